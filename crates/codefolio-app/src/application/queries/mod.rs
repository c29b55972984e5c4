mod dashboard_queries;

pub use dashboard_queries::{DashboardQueries, ProviderClients};
