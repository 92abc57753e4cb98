//! Single-pass record sequences
//!
//! A [`RecordStream`] yields decoded records one at a time. Underneath, every
//! element is a [`Step`]: a record to hand out, a malformed element to log and
//! skip, or a failure that ends the stream. Skips are consumed inside the
//! stream, so callers only ever see `Ok(record)` or a final `Err`.

use crate::domain::errors::{FetchError, MalformedRecord};
use crate::log_skipped_record;
use serde_json::Value;

/// One element of an underlying record sequence
#[derive(Debug)]
pub enum Step<T> {
    /// A usable record
    Record(T),
    /// A malformed element; logged and skipped
    Skip(MalformedRecord),
    /// The sequence cannot continue
    Abort(FetchError),
}

/// Iterator over the records of one API response
///
/// Yields `Ok(record)` for each good element. After an `Err` the stream is
/// finished. Records already yielded before the failure stay valid.
pub struct RecordStream<T> {
    steps: Box<dyn Iterator<Item = Step<T>> + Send>,
    doctor_id: Option<i64>,
    finished: bool,
}

impl<T: Send + 'static> RecordStream<T> {
    /// Builds a stream from arbitrary steps
    pub fn from_steps<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Step<T>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            steps: Box::new(steps.into_iter()),
            doctor_id: None,
            finished: false,
        }
    }

    /// Builds a stream that decodes each payload element lazily
    pub fn from_payload<F>(records: Vec<Value>, decode: F) -> Self
    where
        F: Fn(Value) -> Result<T, MalformedRecord> + Send + 'static,
    {
        Self::from_steps(records.into_iter().map(move |raw| match decode(raw) {
            Ok(record) => Step::Record(record),
            Err(malformed) => Step::Skip(malformed),
        }))
    }

    /// A stream with nothing in it
    pub fn empty() -> Self {
        Self::from_steps(Vec::new())
    }

    /// Attaches the doctor id to every skip log entry
    pub fn for_doctor(mut self, doctor_id: i64) -> Self {
        self.doctor_id = Some(doctor_id);
        self
    }
}

impl<T> Iterator for RecordStream<T> {
    type Item = Result<T, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.steps.next() {
                Some(Step::Record(record)) => return Some(Ok(record)),
                Some(Step::Skip(malformed)) => match self.doctor_id {
                    Some(doctor_id) => log_skipped_record!(malformed, doctor_id),
                    None => log_skipped_record!(malformed),
                },
                Some(Step::Abort(err)) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

impl<T> std::fmt::Debug for RecordStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("doctor_id", &self.doctor_id)
            .field("finished", &self.finished)
            .finish()
    }
}
