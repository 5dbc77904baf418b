//! Terminal rendering: notices and the endpoint catalog.

use std::fmt::Write;

use crypto_client_core::catalog::{self, Category};
use crypto_client_core::{Notice, NotificationSink};

/// Prints notices to stderr so they never mix into piped response output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, notice: Notice) {
        eprintln!("{notice}");
    }
}

/// One block per group: a heading, then `name  methods  path  (description)` rows.
/// Config endpoints are marked as writable.
pub fn render_catalog(category: Option<Category>) -> String {
    let mut out = String::new();
    let groups = catalog::groups()
        .iter()
        .filter(|g| category.is_none() || category == Some(g.category));

    for group in groups {
        let _ = writeln!(out, "[{}] {}", group.category, group.title);
        let width = group.endpoints.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for endpoint in group.endpoints {
            let path = if endpoint.path.is_empty() { "/" } else { endpoint.path };
            let mode = if endpoint.accepts_value() { "GET/POST" } else { "GET" };
            let _ = writeln!(
                out,
                "  {:width$}  {:8}  {}  ({})",
                endpoint.name, mode, path, endpoint.description
            );
        }
        out.push('\n');
    }
    out
}
