//! Mock server state management.
//!
//! Provides the in-memory data store for the mock business API server.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::models::{
    Asset, ConceptInfo, ContactType, CountryInfo, EntityTypeInfo, ProfileInfo, Restaurant,
    RetailLocation, StateInfo, User,
};

/// One row served by the `ListObjects` endpoint.
pub type ObjectRow = BTreeMap<String, Value>;

/// Shared state for the mock server.
///
/// Holds all the mock data the server will serve, plus counters the tests
/// assert on (authentication calls, list requests per resource). It's
/// wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Credentials the authenticate endpoint accepts. `None` accepts any
    /// non-empty user name/password pair.
    pub credentials: Option<(String, String)>,

    /// Users indexed by user name.
    pub users: BTreeMap<String, User>,

    /// Assets indexed by ID.
    pub assets: BTreeMap<String, Asset>,

    /// Retail locations indexed by ID.
    pub retail_locations: BTreeMap<String, RetailLocation>,

    /// Restaurants indexed by ID.
    pub restaurants: BTreeMap<String, Restaurant>,

    /// Lookup tables, served in insertion order.
    pub countries: Vec<CountryInfo>,
    pub states: Vec<StateInfo>,
    pub profiles: Vec<ProfileInfo>,
    pub entity_types: Vec<EntityTypeInfo>,
    pub concepts: Vec<ConceptInfo>,
    pub contact_types: Vec<ContactType>,

    /// Object rows served by `CountObjects`/`ListObjects`, per app name.
    pub objects: BTreeMap<String, Vec<ObjectRow>>,

    /// Tickets issued by the authenticate endpoint and still honored.
    valid_tickets: HashSet<String>,

    /// How many authentication requests have been served.
    auth_count: u64,

    /// How many list requests each resource has served.
    list_requests: BTreeMap<String, u64>,

    ticket_seq: u64,
}

impl MockState {
    /// Create empty state accepting any credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this state for sharing with the server.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Only accept this user name/password pair on the authenticate endpoint.
    #[must_use]
    pub fn with_credentials(
        mut self,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((user_name.into(), password.into()));
        self
    }

    /// Add a user. The user must carry a `UserName`.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        let key = user.user_name.clone().unwrap_or_default();
        self.users.insert(key, user);
        self
    }

    /// Add an asset. The asset must carry an `Id`.
    #[must_use]
    pub fn with_asset(mut self, asset: Asset) -> Self {
        let key = asset.id.clone().unwrap_or_default();
        self.assets.insert(key, asset);
        self
    }

    /// Add a retail location. The location must carry an `Id`.
    #[must_use]
    pub fn with_retail_location(mut self, location: RetailLocation) -> Self {
        let key = location.id.clone().unwrap_or_default();
        self.retail_locations.insert(key, location);
        self
    }

    /// Add a restaurant. The restaurant must carry an `Id`.
    #[must_use]
    pub fn with_restaurant(mut self, restaurant: Restaurant) -> Self {
        let key = restaurant.id.clone().unwrap_or_default();
        self.restaurants.insert(key, restaurant);
        self
    }

    /// Add object rows for an app, served by `CountObjects`/`ListObjects`.
    #[must_use]
    pub fn with_objects(mut self, app_name: impl Into<String>, rows: Vec<ObjectRow>) -> Self {
        self.objects.insert(app_name.into(), rows);
        self
    }

    // =========================================================================
    // Ticket bookkeeping
    // =========================================================================

    /// Whether the authenticate endpoint accepts this credential pair.
    pub(crate) fn credentials_match(&self, user_name: &str, password: &str) -> bool {
        match &self.credentials {
            Some((expected_user, expected_password)) => {
                expected_user == user_name && expected_password == password
            }
            None => !user_name.is_empty() && !password.is_empty(),
        }
    }

    /// Issue a new ticket, recording the authentication request.
    pub(crate) fn issue_ticket(&mut self) -> String {
        self.auth_count += 1;
        self.ticket_seq += 1;
        let ticket = format!("ticket-{}", self.ticket_seq);
        self.valid_tickets.insert(ticket.clone());
        ticket
    }

    /// Whether this ticket was issued by [`issue_ticket`](Self::issue_ticket).
    pub(crate) fn ticket_is_valid(&self, ticket: &str) -> bool {
        self.valid_tickets.contains(ticket)
    }

    /// Forget a ticket, so requests carrying it are rejected as expired.
    pub fn revoke_ticket(&mut self, ticket: &str) {
        self.valid_tickets.remove(ticket);
    }

    /// How many authentication requests this server has served.
    pub fn auth_count(&self) -> u64 {
        self.auth_count
    }

    // =========================================================================
    // Request counters
    // =========================================================================

    /// Record a list request against `resource`.
    pub(crate) fn record_list_request(&mut self, resource: &str) {
        *self.list_requests.entry(resource.to_string()).or_default() += 1;
    }

    /// How many list requests `resource` has served.
    pub fn list_request_count(&self, resource: &str) -> u64 {
        self.list_requests.get(resource).copied().unwrap_or(0)
    }

    // =========================================================================
    // Object queries
    // =========================================================================

    /// The object rows of `app_name` matching `filter`.
    ///
    /// The mock understands the empty filter (all rows) and single
    /// `Property = 'Value'` equality filters; anything else matches nothing.
    pub(crate) fn query_objects(&self, app_name: &str, filter: Option<&str>) -> Vec<&ObjectRow> {
        let rows = match self.objects.get(app_name) {
            Some(rows) => rows,
            None => return Vec::new(),
        };

        match filter.filter(|f| !f.trim().is_empty()) {
            None => rows.iter().collect(),
            Some(filter) => match parse_equality_filter(filter) {
                Some((property, expected)) => rows
                    .iter()
                    .filter(|row| {
                        row.get(&property)
                            .and_then(Value::as_str)
                            .is_some_and(|v| v == expected)
                    })
                    .collect(),
                None => Vec::new(),
            },
        }
    }
}

/// Parse a `Property = 'Value'` filter into its parts.
fn parse_equality_filter(filter: &str) -> Option<(String, String)> {
    let (property, value) = filter.split_once('=')?;
    let value = value.trim().strip_prefix('\'')?.strip_suffix('\'')?;
    Some((property.trim().to_string(), value.to_string()))
}
