//! Static catalog of the crypto API's endpoints.
//!
//! Pure data plus lookups. Groups are listed in display order; the config
//! category is split into three groups the way the API's settings are
//! organized (general tuning, balance bookkeeping, order switches).

use std::fmt;
use std::str::FromStr;

/// Top-level endpoint category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Prices,
    Config,
    Stats,
    Orders,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Prices,
        Category::Config,
        Category::Stats,
        Category::Orders,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Prices => "prices",
            Category::Config => "config",
            Category::Stats => "stats",
            Category::Orders => "orders",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown category {s:?} (expected prices, config, stats or orders)")
            })
    }
}

/// A named endpoint. `path` is empty for the API root, otherwise starts with `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

impl EndpointDescriptor {
    const fn new(name: &'static str, path: &'static str, description: &'static str) -> Self {
        Self {
            name,
            path,
            description,
        }
    }

    /// Config endpoints are the only ones that accept a POSTed value.
    pub fn accepts_value(&self) -> bool {
        self.config_key().is_some()
    }

    /// The `<key>` of a `/config/<key>` endpoint.
    pub fn config_key(&self) -> Option<&'static str> {
        self.path.strip_prefix("/config/")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EndpointGroup {
    pub category: Category,
    pub title: &'static str,
    pub endpoints: &'static [EndpointDescriptor],
}

const PRICES: &[EndpointDescriptor] = &[
    EndpointDescriptor::new("API Info", "", "General information about the API"),
    EndpointDescriptor::new("Prices", "/prices", "Current asset prices"),
];

const CONFIG_GENERAL: &[EndpointDescriptor] = &[
    EndpointDescriptor::new("Sensitivity", "/config/sensitivity", "Sensitivity setting"),
    EndpointDescriptor::new("Verbose", "/config/verbose", "Verbosity setting"),
    EndpointDescriptor::new("Trend Threshold", "/config/trend_threshold", "Trend threshold"),
    EndpointDescriptor::new("Quantidade Ativos", "/config/quantidade_ativos", "Number of assets"),
    EndpointDescriptor::new("Accuracy", "/config/accuracy", "Accuracy"),
    EndpointDescriptor::new(
        "Analysis Interval",
        "/config/ANALYSIS_INTERVAL_SECONDS",
        "Analysis interval in seconds",
    ),
    EndpointDescriptor::new("Interval Seconds", "/config/INTERVAL_SECONDS", "Interval in seconds"),
    EndpointDescriptor::new(
        "Moving Average Window",
        "/config/MOVING_AVERAGE_WINDOW",
        "Moving average window",
    ),
    EndpointDescriptor::new(
        "Moving Average Window EMA",
        "/config/MOVING_AVERAGE_WINDOW_EMA",
        "EMA moving average window",
    ),
    EndpointDescriptor::new("Start Order", "/config/START_ORDER", "Initial order"),
];

const CONFIG_BALANCE: &[EndpointDescriptor] = &[
    EndpointDescriptor::new(
        "Last Position Action",
        "/config/last_position_action",
        "Last position action",
    ),
    EndpointDescriptor::new(
        "Start Day Position",
        "/config/start_day_position",
        "Position at start of day",
    ),
    EndpointDescriptor::new(
        "Last Position Price",
        "/config/last_position_price",
        "Last position price",
    ),
    EndpointDescriptor::new(
        "Order Purchased Total",
        "/config/order_purchased_total",
        "Total purchased",
    ),
    EndpointDescriptor::new("Quantity Buy", "/config/qty_buy", "Quantity to buy"),
    EndpointDescriptor::new("Order Sold Total", "/config/order_sold_total", "Total sold"),
    EndpointDescriptor::new("Quantity Sell", "/config/qty_sell", "Quantity to sell"),
    EndpointDescriptor::new("Day Balance", "/config/day_balance", "Daily balance"),
    EndpointDescriptor::new("Operations", "/config/operations", "Operations"),
    EndpointDescriptor::new("Rate", "/config/rate", "Rate"),
    EndpointDescriptor::new("Bulge", "/config/bulge", "Bulge"),
];

const CONFIG_OTHER: &[EndpointDescriptor] = &[
    EndpointDescriptor::new("Order Enable", "/config/order_enable", "Enable orders"),
    EndpointDescriptor::new("Order Total", "/config/order_total", "Order total"),
    EndpointDescriptor::new("Order Execute Now", "/config/order_execute_now", "Execute order now"),
    EndpointDescriptor::new("Action Position", "/config/action_position", "Action position"),
    EndpointDescriptor::new(
        "Last Position Value",
        "/config/last_position_value",
        "Last position value",
    ),
];

const STATS: &[EndpointDescriptor] =
    &[EndpointDescriptor::new("Stats", "/stats", "API statistics")];

const ORDERS: &[EndpointDescriptor] =
    &[EndpointDescriptor::new("Orders", "/orders", "Order information")];

static GROUPS: [EndpointGroup; 6] = [
    EndpointGroup {
        category: Category::Prices,
        title: "Prices",
        endpoints: PRICES,
    },
    EndpointGroup {
        category: Category::Config,
        title: "General settings",
        endpoints: CONFIG_GENERAL,
    },
    EndpointGroup {
        category: Category::Config,
        title: "Balance settings",
        endpoints: CONFIG_BALANCE,
    },
    EndpointGroup {
        category: Category::Config,
        title: "Other settings",
        endpoints: CONFIG_OTHER,
    },
    EndpointGroup {
        category: Category::Stats,
        title: "Stats",
        endpoints: STATS,
    },
    EndpointGroup {
        category: Category::Orders,
        title: "Orders",
        endpoints: ORDERS,
    },
];

pub fn groups() -> &'static [EndpointGroup] {
    &GROUPS
}

pub fn groups_in(category: Category) -> impl Iterator<Item = &'static EndpointGroup> {
    GROUPS.iter().filter(move |g| g.category == category)
}

pub fn endpoints() -> impl Iterator<Item = &'static EndpointDescriptor> {
    GROUPS.iter().flat_map(|g| g.endpoints.iter())
}

/// Look up an endpoint by exact path or by display name (case-insensitive).
pub fn find(query: &str) -> Option<&'static EndpointDescriptor> {
    let query = query.trim();
    endpoints()
        .find(|e| e.path == query)
        .or_else(|| endpoints().find(|e| e.name.eq_ignore_ascii_case(query)))
}
