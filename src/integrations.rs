use std::collections::BTreeSet;

/// Every integration the dashboard knows about, in display order.
pub const INTEGRATION_CATALOG: &[&str] = &[
    "airtable",
    "amazon advertising api",
    "amazon seller central",
    "apple search ad",
    "asana",
    "azure data storage",
    "azure sql",
    "bing ad",
    "braintree",
    "chargebee",
    "clickup",
    "cloud storage",
    "criteo",
    "csv",
    "datos survey",
    "exchange rate api",
    "facebook ad",
    "facebook pages",
    "file cloud",
    "freshdesk",
    "freshsales",
    "google ad",
    "google analytics",
    "google bigquery",
    "google sheet",
    "hubspot",
    "instagram",
    "klaviyo",
    "lever",
    "linkedin ad",
    "mailchimp",
    "mongo db",
    "mssql",
    "mysql",
    "netsuite",
    "office 365 sharepoint",
    "outbrain",
    "paypal",
    "pinterest ad",
    "pipedrive",
    "postgres",
    "recharge",
    "s3",
    "salesforce",
    "sap",
    "sftp",
    "shopify",
    "snapchat",
    "stripe",
    "taboola",
    "tiktok",
    "twitter ad",
    "typeform",
    "xero",
    "xlsx",
    "yahoo gemini",
    "youtube",
    "zendesk",
];

/// Default selection for the per-integration-over-time chart.
pub const DEFAULT_TIME_INTEGRATIONS: &[&str] = &["shopify", "zendesk", "google ad"];

pub fn all_integrations() -> BTreeSet<String> {
    INTEGRATION_CATALOG.iter().map(|name| (*name).to_owned()).collect()
}

pub fn default_time_integrations() -> BTreeSet<String> {
    DEFAULT_TIME_INTEGRATIONS
        .iter()
        .map(|name| (*name).to_owned())
        .collect()
}

pub fn is_known(name: &str) -> bool {
    INTEGRATION_CATALOG.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_no_duplicates() {
        assert_eq!(all_integrations().len(), INTEGRATION_CATALOG.len());
    }

    #[test]
    fn time_defaults_come_from_catalog() {
        assert!(DEFAULT_TIME_INTEGRATIONS.iter().all(|name| is_known(name)));
    }
}
