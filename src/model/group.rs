//! Named collections of endpoint definitions.

use serde::Serialize;

use super::definition::ApiDefinition;
use super::form::Form;
use super::path::FieldPath;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct ApiGroup<F: Form> {
    pub name: String,
    pub definitions: Vec<ApiDefinition<F>>,
}

impl<F: Form> Default for ApiGroup<F> {
    fn default() -> Self {
        Self {
            name: String::new(),
            definitions: Vec::new(),
        }
    }
}

impl<F: Form> ApiGroup<F> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
        }
    }

    pub(crate) fn try_map_durations<G, E, M>(
        self,
        path: &FieldPath,
        map: &mut M,
    ) -> Result<ApiGroup<G>, E>
    where
        G: Form,
        M: FnMut(&FieldPath, F::Duration) -> Result<G::Duration, E>,
    {
        let definitions_path = path.field("definitions");
        let definitions = self
            .definitions
            .into_iter()
            .enumerate()
            .map(|(i, d)| d.try_map_durations(&definitions_path.index(i), &mut *map))
            .collect::<Result<Vec<_>, E>>()?;

        Ok(ApiGroup {
            name: self.name,
            definitions,
        })
    }
}
