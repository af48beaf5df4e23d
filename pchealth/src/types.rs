//! Types that mirror the health server's `system_metrics` JSON payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Cores {
    pub count: u32,
    // The server sends a rounded MHz number; older builds sent a preformatted string.
    #[serde(deserialize_with = "string_or_number")]
    pub frequency: String,
    #[serde(default)]
    pub per_core: Vec<f64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Cpu {
    pub percent: f64,
    pub cores: Cores,
}

/// Used/free/total are already in GB.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Usage {
    pub percent: f64,
    pub used: f64,
    pub free: f64,
    pub total: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Volume {
    pub device: String,
    #[serde(default)]
    pub fstype: String,
    pub total: f64,
    pub used: f64,
    pub free: f64,
    pub percent: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Network {
    // cumulative totals; client diffs to compute rates
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    #[serde(default)]
    pub create_time: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub source: String,
    pub level: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uptime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CacheLocation {
    pub size: u64,
    pub file_count: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CacheInfo {
    pub total_size: u64,
    pub file_count: u64,
    #[serde(default)]
    pub paths: BTreeMap<String, CacheLocation>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Historical {
    #[serde(default)]
    pub timestamps: Option<Vec<String>>,
    #[serde(default)]
    pub cpu: Vec<f64>,
    #[serde(default)]
    pub memory: Vec<f64>,
}

/// One complete push from the server. Never merged with earlier snapshots.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Snapshot {
    pub cpu: Cpu,
    pub memory: Usage,
    pub disk: Usage,
    #[serde(default)]
    pub disk_info: Vec<Volume>,
    pub network: Network,
    #[serde(default)]
    pub processes: Vec<ProcessInfo>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    pub uptime: Uptime,
    #[serde(default)]
    pub cache_info: Option<CacheInfo>,
    #[serde(default)]
    pub historical: Option<Historical>,
}

fn string_or_number<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match Raw::deserialize(de)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "cpu": {"percent": 12.5, "cores": {"count": 4, "frequency": 2400.0, "per_core": [10.0, 20.0, 5.5, 80.0]}},
        "memory": {"total": 15.5, "used": 7.25, "free": 8.25, "percent": 46.8},
        "disk": {"total": 476.0, "used": 200.0, "free": 276.0, "percent": 42.0},
        "disk_info": [{"device": "/dev/sda1", "mountpoint": "/", "fstype": "ext4",
                       "total": 476.0, "used": 200.0, "free": 276.0, "percent": 42.0}],
        "network": {"bytes_sent": 1000, "bytes_recv": 2000, "packets_sent": 3, "packets_recv": 4,
                    "errin": 0, "errout": 0, "dropin": 0, "dropout": 0},
        "logs": [{"timestamp": "2024-01-01 10:00:00", "source": "CPU", "level": "Information", "message": "ok"}],
        "processes": [{"pid": 1, "name": "init", "username": null, "memory_percent": 0.1,
                       "cpu_percent": 0, "create_time": "2024-01-01 09:00:00"}],
        "cache_info": {"total_size": 2048, "file_count": 3,
                       "paths": {"/tmp": {"size": 2048, "file_count": 3}}},
        "uptime": {"days": 0, "hours": 1, "minutes": 2, "seconds": 3},
        "historical": {"cpu": [1.0, 2.0], "memory": [3.0, 4.0], "disk": [5.0, 6.0],
                       "network": {"sent": [], "received": []}, "timestamps": ["10:00:00", "10:00:30"]}
    }"#;

    #[test]
    fn parses_server_payload_and_ignores_extra_fields() {
        let s: Snapshot = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(s.cpu.cores.count, 4);
        assert_eq!(s.cpu.cores.frequency, "2400.0");
        assert_eq!(s.disk_info[0].fstype, "ext4");
        assert_eq!(s.network.bytes_recv, 2000);
        assert_eq!(s.processes[0].username, None);
        assert_eq!(s.cache_info.as_ref().unwrap().paths["/tmp"].size, 2048);
        assert_eq!(
            s.historical.unwrap().timestamps.unwrap(),
            vec!["10:00:00", "10:00:30"]
        );
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let s: Snapshot = serde_json::from_str(
            r#"{
            "cpu": {"percent": 1.0, "cores": {"count": 1, "frequency": "3.1 GHz", "per_core": [1.0]}},
            "memory": {"total": 1.0, "used": 0.5, "free": 0.5, "percent": 50.0},
            "disk": {"total": 1.0, "used": 0.5, "free": 0.5, "percent": 50.0},
            "network": {"bytes_sent": 0, "bytes_recv": 0},
            "uptime": {"days": 0, "hours": 0, "minutes": 0, "seconds": 1}
        }"#,
        )
        .unwrap();
        assert_eq!(s.cpu.cores.frequency, "3.1 GHz");
        assert!(s.disk_info.is_empty() && s.processes.is_empty() && s.logs.is_empty());
        assert!(s.cache_info.is_none() && s.historical.is_none());
    }
}
