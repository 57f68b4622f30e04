//! Summary printed after a sheet has been through a form session.

use serde_json::{json, Value};

use sheetsmith_engine::FormSession;

/// Status registry, missing required fields and the wrapped document the
/// session would persist.
pub fn build(session: &FormSession) -> Value {
    let saved = session.submit();
    if let Err(err) = &saved {
        tracing::warn!(error = %err, "Sheet is not ready to persist");
    }

    json!({
        "ready": saved.is_ok(),
        "status_paths": session.status_paths(),
        "missing_required": session.missing_required(),
        "sheet": session.to_wrapped().to_json(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsmith_domain::{Schema, SheetValue};
    use sheetsmith_engine::EngineConfig;

    fn schema() -> Schema {
        Schema::from_value(json!({
            "nome": {"type": "string", "required": true},
            "vida": {"type": "status"}
        }))
        .unwrap()
    }

    #[test]
    fn test_report_for_blank_sheet() {
        let session = FormSession::new(schema(), &EngineConfig::default());
        assert_eq!(
            build(&session),
            json!({
                "ready": false,
                "status_paths": ["vida.value"],
                "missing_required": ["Nome"],
                "sheet": {"nome": {"value": ""}, "vida": {"value": ""}}
            })
        );
    }

    #[test]
    fn test_report_for_complete_sheet() {
        let wrapped = SheetValue::from(json!({
            "nome": {"value": "Ayla"},
            "vida": {"value": {"value": {"value": 8}, "max": {"value": 10}}}
        }));
        let session = FormSession::load(schema(), &wrapped, &EngineConfig::default());
        let report = build(&session);

        assert_eq!(report["ready"], json!(true));
        assert_eq!(report["missing_required"], json!([]));
        assert_eq!(report["sheet"], wrapped.to_json());
    }
}
