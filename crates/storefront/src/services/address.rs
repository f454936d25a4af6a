//! Simulated postal code lookup.

use std::time::Duration;

use async_trait::async_trait;
use murela_core::{AddressLookupResult, PostalCode};

use super::{AddressLookup, ServiceError, simulate_latency};

/// Answers from a small table of known postal codes and a generic address
/// for everything else.
#[derive(Debug, Clone)]
pub struct MockAddressLookup {
    delay: Duration,
}

impl MockAddressLookup {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

fn known_address(cep: &str) -> (&'static str, &'static str, &'static str, &'static str) {
    match cep {
        "01001000" => ("Praça da Sé", "Sé", "São Paulo", "SP"),
        "20010000" => ("Avenida Rio Branco", "Centro", "Rio de Janeiro", "RJ"),
        "70070000" => (
            "Esplanada dos Ministérios",
            "Zona Cívico-Administrativa",
            "Brasília",
            "DF",
        ),
        _ => ("Rua Exemplo", "Bairro Teste", "Cidade Exemplo", "SP"),
    }
}

#[async_trait]
impl AddressLookup for MockAddressLookup {
    #[tracing::instrument(skip(self), fields(cep = %cep))]
    async fn lookup(&self, cep: &PostalCode) -> Result<AddressLookupResult, ServiceError> {
        simulate_latency(self.delay).await;

        let (street, neighborhood, city, state) = known_address(cep.as_str());
        Ok(AddressLookupResult {
            street: street.to_string(),
            neighborhood: neighborhood.to_string(),
            city: city.to_string(),
            state: state.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_postal_codes() {
        let lookup = MockAddressLookup::new(Duration::ZERO);

        let sp = lookup.lookup(&PostalCode::parse("01001-000").unwrap()).await.unwrap();
        assert_eq!(sp.street, "Praça da Sé");
        assert_eq!(sp.city, "São Paulo");

        let rj = lookup.lookup(&PostalCode::parse("20010000").unwrap()).await.unwrap();
        assert_eq!(rj.state, "RJ");

        let df = lookup.lookup(&PostalCode::parse("70070000").unwrap()).await.unwrap();
        assert_eq!(df.neighborhood, "Zona Cívico-Administrativa");
    }

    #[tokio::test]
    async fn test_unknown_postal_code_gets_generic_address() {
        let lookup = MockAddressLookup::new(Duration::ZERO);
        let found = lookup.lookup(&PostalCode::parse("99999999").unwrap()).await.unwrap();
        assert_eq!(found.street, "Rua Exemplo");
        assert_eq!(found.city, "Cidade Exemplo");
        assert_eq!(found.state, "SP");
    }
}
