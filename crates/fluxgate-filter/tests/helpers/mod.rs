use std::sync::Arc;

use fluxgate_filter::{CompiledFilter, JsonEvent, Recorder, compile};
use serde_json::Value;

pub fn traced(spec: Value) -> (CompiledFilter, Arc<Recorder>) {
    let rec = Arc::new(Recorder::default());
    let filter = compile(&spec, rec.clone()).unwrap();
    (filter, rec)
}

/// Build the spec, evaluate it once, and return the result together with
/// every trace line emitted.
pub fn eval(spec: Value, event: Value) -> (bool, Vec<String>) {
    let (filter, rec) = traced(spec);
    let result = filter.eval(&JsonEvent::from_value(&event));
    (result, rec.take())
}
