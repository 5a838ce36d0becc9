use crate::record::RecordSet;

pub const NANOS_PER_SECOND: f64 = 1e9;

/// Rescales every `time` from nanoseconds to seconds in place.
pub fn nanos_to_seconds(records: &mut RecordSet) {
    for record in records.iter_mut() {
        record.time /= NANOS_PER_SECOND;
    }
}
