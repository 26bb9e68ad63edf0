//! Built-in demonstration routes.
//!
//! The first route here declares the required power supply, which unlocks
//! registration for everything after it, including configured routes.

use crate::routing::{exhibit, RegistrationError, Registrar};

/// Register the demonstration routes.
///
/// With `include_broken`, also registers a route whose chain starts with an
/// adapter. That registration always fails, which makes startup abort.
pub fn register(registrar: &mut Registrar, include_broken: bool) -> Result<(), RegistrationError> {
    registrar
        .route("GET", "/students")
        .cable("usbc")
        .adapter("to-usba")
        .cable("usba")
        .power_supply(60, "usbc")
        .finalize(|| "GET request received: students".to_string())?;

    registrar
        .route("POST", "/gallery")
        .cable("usbc")
        .adapter("to-usba")
        .cable("usba")
        .power_supply(60, "usbc")
        .curate()
        .finalize(exhibit(|| "POST request received: gallery".to_string()))?;

    registrar
        .route("GET", "/hautevoltage")
        .cable("usbc")
        .adapter("step-up")
        .cable("usbc")
        .power_supply(60, "usbc")
        .curate()
        .finalize(exhibit(|| {
            "We have stepped up the voltage to 220! Danger, high voltage!".to_string()
        }))?;

    registrar
        .route("DELETE", "/students")
        .cable("usbc")
        .adapter("to-usba")
        .cable("usba")
        .power_supply(60, "usbc")
        .finalize(|| "DELETE request received: students".to_string())?;

    if include_broken {
        registrar
            .route("GET", "/panicExample")
            .adapter("to-usba")
            .cable("usba")
            .power_supply(60, "usbc")
            .finalize(|| "unreachable: this route never registers".to_string())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainError;

    #[test]
    fn showcase_registers() {
        let mut registrar = Registrar::new();
        register(&mut registrar, false).unwrap();

        let table = registrar.table();
        assert_eq!(table.len(), 4);
        assert_eq!(registrar.curated_routes(), 2);

        let gallery = table.lookup("POST", "/gallery").unwrap();
        assert!(gallery().contains("POST request received: gallery"));
        let delete = table.lookup("DELETE", "/students").unwrap();
        assert_eq!(delete(), "DELETE request received: students");
    }

    #[test]
    fn broken_route_fails() {
        let mut registrar = Registrar::new();
        let err = register(&mut registrar, true).unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::ChainValidationFailed {
                source: ChainError::MustStartWithCable { .. },
                ..
            }
        ));
    }
}
