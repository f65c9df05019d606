//! Industry entities: a read-only legacy catalog used to classify companies.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::{Entity, Error};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Industry {
    pub id: i64,
    pub name: String,
}

/// `GET /industries.json` (legacy v1). The catalog is small and unfiltered.
#[derive(Debug, Default)]
pub struct Multiple {
    pub industries: Vec<Industry>,
}

#[derive(Deserialize)]
struct MultipleEnvelope {
    #[serde(default)]
    industries: Vec<Industry>,
}

impl Entity for Multiple {
    fn name(&self) -> &'static str {
        "industries"
    }

    fn build(&self, client: &Client, server: &str) -> Result<RequestBuilder, Error> {
        Ok(client.get(format!("{server}/industries.json")))
    }

    fn decode(&mut self, body: &[u8]) -> Result<(), Error> {
        let envelope: MultipleEnvelope =
            serde_json::from_slice(body).map_err(|e| Error::decode("industries", e))?;
        self.industries = envelope.industries;
        Ok(())
    }
}
