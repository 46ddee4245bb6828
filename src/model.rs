use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_LIST_LIMIT: u32 = 50;
pub const DEFAULT_LIST_OFFSET: u32 = 0;

/// A remote resource type addressed by a fixed endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Subcommand name, also the key of the list in responses without `data`
    pub name: &'static str,
    /// Human readable plural name
    pub title: &'static str,
    pub endpoint: &'static str,
}

impl ResourceKind {
    pub fn collection_path(&self) -> &'static str {
        self.endpoint
    }

    /// Collection path carrying the list query, e.g. `/api/website-monitors?limit=50&offset=0`
    pub fn list_path(&self, query: &ListQuery) -> Result<String, serde_urlencoded::ser::Error> {
        Ok(format!("{}?{}", self.endpoint, query.to_query_string()?))
    }

    pub fn record_path(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    /// Monitor resources get `monitor_type`, `check_frequency` and `timeout` defaults on create
    pub fn is_monitor(&self) -> bool {
        self.name.contains("monitor")
    }

    pub fn monitor_type(&self) -> String {
        self.name.to_uppercase()
    }
}

/// A top level command grouping several resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceGroup {
    pub name: &'static str,
    pub about: &'static str,
    pub resources: &'static [ResourceKind],
}

impl ResourceGroup {
    pub fn resource(&self, name: &str) -> Option<&'static ResourceKind> {
        self.resources.iter().find(|r| r.name == name)
    }
}

pub const WEBSITE_MONITORS: ResourceKind = ResourceKind {
    name: "website-monitors",
    title: "Website Monitors",
    endpoint: "/api/website-monitors",
};

pub const API_MONITORS: ResourceKind = ResourceKind {
    name: "api-monitors",
    title: "API Monitors",
    endpoint: "/api/api-monitors",
};

pub const PERFORMANCE_REPORTS: ResourceKind = ResourceKind {
    name: "performance-reports",
    title: "Performance Reports",
    endpoint: "/api/performance-reports",
};

pub const RESOURCE_GROUPS: &[ResourceGroup] = &[
    ResourceGroup {
        name: "monitor-management",
        about: "Manage Monitor Management",
        resources: &[WEBSITE_MONITORS, API_MONITORS],
    },
    ResourceGroup {
        name: "reports",
        about: "Manage Reports",
        resources: &[PERFORMANCE_REPORTS],
    },
];

pub fn find_group(name: &str) -> Option<&'static ResourceGroup> {
    RESOURCE_GROUPS.iter().find(|g| g.name == name)
}

/// Monitor status filter accepted by `list --status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorStatus {
    Up,
    Down,
    Trouble,
    Critical,
    Suspended,
}

/// Query parameters of a list request, serialized in field order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MonitorStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            limit: DEFAULT_LIST_LIMIT,
            offset: DEFAULT_LIST_OFFSET,
            status: None,
            group_id: None,
        }
    }
}

impl ListQuery {
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }
}

/// Records of a list response: `data` if present, else the list named after the resource
pub fn extract_records(kind: &ResourceKind, response: Value) -> Value {
    match response {
        Value::Object(mut map) => {
            if let Some(data) = map.remove("data") {
                data
            } else {
                map.remove(kind.name)
                    .unwrap_or_else(|| Value::Array(Vec::new()))
            }
        }
        other => other,
    }
}

/// Single record of a response: `data` if present, else the whole body
pub fn extract_record(response: Value) -> Value {
    match response {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_lookup() {
        let group = find_group("monitor-management").unwrap();
        assert_eq!(group.resource("api-monitors"), Some(&API_MONITORS));
        assert!(group.resource("performance-reports").is_none());
        assert!(find_group("unknown").is_none());
    }

    #[test]
    fn test_record_path() {
        assert_eq!(
            WEBSITE_MONITORS.record_path("123"),
            "/api/website-monitors/123"
        );
    }

    #[test]
    fn test_monitor_defaults_only_for_monitor_resources() {
        assert!(WEBSITE_MONITORS.is_monitor());
        assert_eq!(API_MONITORS.monitor_type(), "API-MONITORS");
        assert!(!PERFORMANCE_REPORTS.is_monitor());
    }

    #[test]
    fn test_list_query_serialization() {
        let query = ListQuery {
            limit: 10,
            status: Some(MonitorStatus::Down),
            ..ListQuery::default()
        };
        assert_eq!(
            query.to_query_string().unwrap(),
            "limit=10&offset=0&status=down"
        );

        let query = ListQuery {
            group_id: Some("77".to_string()),
            ..ListQuery::default()
        };
        assert_eq!(
            query.to_query_string().unwrap(),
            "limit=50&offset=0&group_id=77"
        );
    }

    #[test]
    fn test_list_path_carries_exact_query() {
        let query = ListQuery {
            limit: 10,
            status: Some(MonitorStatus::Down),
            ..ListQuery::default()
        };
        assert_eq!(
            WEBSITE_MONITORS.list_path(&query).unwrap(),
            "/api/website-monitors?limit=10&offset=0&status=down"
        );
    }

    #[test]
    fn test_extract_records() {
        let with_data = json!({"code": 0, "data": [{"monitor_id": "1"}]});
        assert_eq!(
            extract_records(&WEBSITE_MONITORS, with_data),
            json!([{"monitor_id": "1"}])
        );

        let named = json!({"website-monitors": [{"monitor_id": "2"}]});
        assert_eq!(
            extract_records(&WEBSITE_MONITORS, named),
            json!([{"monitor_id": "2"}])
        );

        assert_eq!(extract_records(&WEBSITE_MONITORS, json!({"code": 0})), json!([]));
    }

    #[test]
    fn test_extract_record() {
        assert_eq!(
            extract_record(json!({"code": 0, "data": {"monitor_id": "1"}})),
            json!({"monitor_id": "1"})
        );
        assert_eq!(extract_record(json!({"monitor_id": "1"})), json!({"monitor_id": "1"}));
    }
}
