use serde::Serialize;

/// One stat card. `value` is `None` when its query failed, so one broken
/// endpoint never blanks the other cards.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StatCard {
    pub name: &'static str,
    pub value: Option<String>,
    pub href: &'static str,
    pub tone: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub cards: Vec<StatCard>,
}
