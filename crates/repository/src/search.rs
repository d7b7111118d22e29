use domain::OrderStatus;

/// Maximum number of orders a filtered search returns.
pub const MAX_RESULTS: usize = 1000;

/// Filter criteria for `OrderRepository::find_all`.
///
/// An empty search matches every order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSearch {
    /// Keep orders whose member name contains this text. Blank text is ignored.
    pub member_name: Option<String>,

    /// Keep orders with this status.
    pub order_status: Option<OrderStatus>,
}

impl OrderSearch {
    /// Creates an empty search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the search to members whose name contains `name`.
    pub fn with_member_name(mut self, name: impl Into<String>) -> Self {
        self.member_name = Some(name.into());
        self
    }

    /// Restricts the search to orders with `status`.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.order_status = Some(status);
        self
    }

    /// Returns the member-name filter if it has any non-whitespace text.
    pub fn member_name_filter(&self) -> Option<&str> {
        self.member_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Returns true if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.member_name_filter().is_none() && self.order_status.is_none()
    }

    /// Checks an order's status and member name against the filter.
    pub fn matches(&self, status: OrderStatus, member_name: &str) -> bool {
        if let Some(expected) = self.order_status
            && status != expected
        {
            return false;
        }
        if let Some(name) = self.member_name_filter()
            && !member_name.contains(name)
        {
            return false;
        }
        true
    }
}
