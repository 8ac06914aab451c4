pub fn long_reply_fixture() -> &'static str {
    return r#"
Amazon S3 (Simple Storage Service) stores objects inside buckets. Each object has a key, a value, and metadata.

Buckets live in a single region, but their names are global. Use versioning to keep every revision of an object.
"#
    .trim();
}

pub fn chat_reply_body(reply: &str) -> String {
    return serde_json::json!({ "reply": reply }).to_string();
}
