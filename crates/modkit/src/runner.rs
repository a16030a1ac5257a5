//! Module runner - validation, dispatch, and payload translation
//!
//! The runner drives one invocation end to end: validate the raw
//! parameter document against the module's contract, deserialize into
//! the module's typed parameters, run the handler, and translate the
//! outcome into exactly one success or failure payload.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::Error;
use crate::report::Report;
use crate::spec::ModuleSpec;

/// A declarative module that can be driven by the host framework
pub trait Module {
    /// Typed view of the validated parameters
    type Params: DeserializeOwned;

    /// Name the module is invoked under
    fn name(&self) -> &'static str;

    /// Parameter contract consumed by the host framework
    fn spec(&self) -> ModuleSpec;

    /// Converge the system toward the supplied parameters, recording
    /// every mutation into `report`
    fn handle(&self, params: Self::Params, report: &mut Report) -> Result<()>;
}

/// Outcome of one module invocation
#[derive(Debug)]
pub struct Invocation {
    /// Payload to serialize on stdout
    pub payload: Value,
    /// Whether the failure exit path was taken
    pub failed: bool,
}

impl Invocation {
    /// Failure payload for an error raised before or during dispatch
    pub fn failure(err: &anyhow::Error) -> Self {
        Self {
            payload: json!({ "failed": true, "msg": format!("{err:#}") }),
            failed: true,
        }
    }
}

/// Run a module against a raw parameter document.
///
/// Exactly one of the success or failure payloads is produced per call:
/// a successful handler yields the report payload, any error yields
/// `{failed: true, msg}`.
pub fn dispatch<M: Module>(module: &M, raw: Value) -> Invocation {
    match execute(module, raw) {
        Ok(report) => Invocation {
            payload: report.into_payload(),
            failed: false,
        },
        Err(err) => Invocation::failure(&err),
    }
}

fn execute<M: Module>(module: &M, raw: Value) -> Result<Report> {
    let normalized = module.spec().validate(raw)?;
    let params: M::Params = serde_json::from_value(Value::Object(normalized))
        .map_err(|e| Error::Validation(e.to_string()))?;

    log::debug!("running module '{}'", module.name());

    let mut report = Report::new();
    module.handle(params, &mut report)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{FieldSpec, FieldType};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct EchoParams {
        message: String,
    }

    struct EchoModule;

    impl Module for EchoModule {
        type Params = EchoParams;

        fn name(&self) -> &'static str {
            "echo"
        }

        fn spec(&self) -> ModuleSpec {
            ModuleSpec::new(&["Echo a message."]).field(
                FieldSpec::new("message", FieldType::String, "Message to echo.").required(),
            )
        }

        fn handle(&self, params: EchoParams, report: &mut Report) -> Result<()> {
            if params.message == "boom" {
                anyhow::bail!("exploded");
            }
            report.record_action(format!("Echoed {}", params.message));
            Ok(())
        }
    }

    #[test]
    fn dispatch_emits_success_payload() {
        let invocation = dispatch(&EchoModule, json!({"message": "hi"}));

        assert!(!invocation.failed);
        assert_eq!(invocation.payload["changed"], json!(true));
        assert_eq!(invocation.payload["actions"], json!(["Echoed hi"]));
        assert!(invocation.payload.get("failed").is_none());
    }

    #[test]
    fn dispatch_emits_failure_payload_on_handler_error() {
        let invocation = dispatch(&EchoModule, json!({"message": "boom"}));

        assert!(invocation.failed);
        assert_eq!(invocation.payload["failed"], json!(true));
        assert!(
            invocation.payload["msg"]
                .as_str()
                .unwrap()
                .contains("exploded")
        );
    }

    #[test]
    fn dispatch_rejects_invalid_parameters_before_handling() {
        let invocation = dispatch(&EchoModule, json!({"bogus": true}));

        assert!(invocation.failed);
        assert!(
            invocation.payload["msg"]
                .as_str()
                .unwrap()
                .contains("unknown field 'bogus'")
        );
    }
}
