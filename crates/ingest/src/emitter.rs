use std::collections::HashSet;
use std::io::Write;

use serde_json::Value;
use thiserror::Error;

use tap_csv_core::{Message, Record, Schema};

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write message: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("record for stream '{0}' written before its schema")]
    RecordBeforeSchema(String),
}

/// Sink for the schema/record/state message stream.
///
/// Per synced file the caller guarantees:
/// - `write_schema` is called exactly once, before any `write_record` for that file;
/// - `write_record` is called once per non-empty data row, in file order;
/// - `write_state` is called once, after the file's last record.
pub trait Emitter {
    fn write_schema(
        &mut self,
        stream: &str,
        schema: Schema,
        key_properties: &[String],
    ) -> Result<(), EmitError>;

    fn write_record(&mut self, stream: &str, record: Record) -> Result<(), EmitError>;

    fn write_state(&mut self, state: &Value) -> Result<(), EmitError>;
}

/// Blanket implementation so `&mut dyn Emitter` can be passed down the call chain.
impl<T: Emitter + ?Sized> Emitter for &mut T {
    fn write_schema(
        &mut self,
        stream: &str,
        schema: Schema,
        key_properties: &[String],
    ) -> Result<(), EmitError> {
        (**self).write_schema(stream, schema, key_properties)
    }

    fn write_record(&mut self, stream: &str, record: Record) -> Result<(), EmitError> {
        (**self).write_record(stream, record)
    }

    fn write_state(&mut self, state: &Value) -> Result<(), EmitError> {
        (**self).write_state(state)
    }
}

/// Writes messages as line-delimited JSON, one [`Message`] per line.
///
/// Rejects records for streams that have not declared a schema yet.
pub struct MessageWriter<W: Write> {
    out: W,
    declared: HashSet<String>,
}

impl<W: Write> MessageWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            declared: HashSet::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_message(&mut self, message: &Message) -> Result<(), EmitError> {
        serde_json::to_writer(&mut self.out, message)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Emitter for MessageWriter<W> {
    fn write_schema(
        &mut self,
        stream: &str,
        schema: Schema,
        key_properties: &[String],
    ) -> Result<(), EmitError> {
        self.write_message(&Message::Schema {
            stream: stream.to_string(),
            schema,
            key_properties: key_properties.to_vec(),
        })?;
        self.declared.insert(stream.to_string());
        Ok(())
    }

    fn write_record(&mut self, stream: &str, record: Record) -> Result<(), EmitError> {
        if !self.declared.contains(stream) {
            return Err(EmitError::RecordBeforeSchema(stream.to_string()));
        }
        self.write_message(&Message::Record {
            stream: stream.to_string(),
            record,
        })
    }

    fn write_state(&mut self, state: &Value) -> Result<(), EmitError> {
        self.write_message(&Message::State {
            value: state.clone(),
        })?;
        self.out.flush()?;
        Ok(())
    }
}
