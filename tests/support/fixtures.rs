//! Test fixtures and constants.

/// Config projecting one versioned secret, one prefix and one service.
pub const SAMPLE_CONFIG: &str = r#"
[[secret]]
path = "secret/data/foo"

[[prefix]]
path = "app/my_service"
no_prefix = true

[[service]]
query = "web"
format_id = "{{service}}_{{key}}"
format_name = "{{service}}_{{key}}"
format_address = "{{service}}_{{key}}"
format_tag = "{{service}}_{{key}}"
format_port = "{{service}}_{{key}}"
"#;

/// Snapshot matching `SAMPLE_CONFIG`.
pub const SAMPLE_SNAPSHOT: &str = r#"{
  "secrets": {
    "secret/data/foo": {
      "metadata": {"destroyed": false, "version": "1"},
      "data": {"bar": "somevalue1", "zed": "somevalue2", "count": 3}
    }
  },
  "prefixes": {
    "app/my_service": [
      {"key": "mykey", "value": "myValue"}
    ]
  },
  "services": {
    "web": [
      {"id": "web-old", "name": "web", "address": "10.0.0.9", "tags": ["old"], "port": 81},
      {"id": "web-1", "name": "web", "address": "10.0.0.1", "tags": ["tag1", "tag2"], "port": 8080}
    ]
  }
}"#;

/// Snapshot holding only a destroyed versioned secret.
pub const DESTROYED_SNAPSHOT: &str = r#"{
  "secrets": {
    "secret/data/foo": {
      "metadata": {"destroyed": true, "version": "2"},
      "data": null
    }
  }
}"#;
