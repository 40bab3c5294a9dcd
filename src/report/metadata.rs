use crate::config::BuildMetadata;
use crate::core::{Record, BUILD_ID_FIELD, BUILD_URL_FIELD, COMMIT_SHA_FIELD};
use serde_json::Value;

/// Largest `date` by plain string comparison.
pub fn latest_date(records: &[Record]) -> Option<String> {
    records.iter().map(|r| r.date()).max().map(|d| d.into_owned())
}

/// Stamp `build` onto every record dated at the latest date and null the
/// build fields everywhere else. Returns how many records were stamped.
pub fn apply_build_metadata_to_latest(records: &mut [Record], build: &BuildMetadata) -> usize {
    let Some(max_date) = latest_date(records) else {
        return 0;
    };

    let mut stamped = 0;
    for record in records.iter_mut() {
        if record.date() == max_date.as_str() {
            set_build_fields(record, Some(build));
            stamped += 1;
        } else {
            set_build_fields(record, None);
        }
    }
    stamped
}

fn set_build_fields(record: &mut Record, build: Option<&BuildMetadata>) {
    let value = |v: Option<&String>| v.map_or(Value::Null, |s| Value::String(s.clone()));

    record.insert(
        COMMIT_SHA_FIELD,
        value(build.and_then(|b| b.commit_sha.as_ref())),
    );
    record.insert(BUILD_ID_FIELD, value(build.and_then(|b| b.build_id.as_ref())));
    record.insert(BUILD_URL_FIELD, value(build.and_then(|b| b.build_url.as_ref())));
}
