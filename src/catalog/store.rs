//! In-memory catalog of API groups.

use std::collections::hash_map::{Entry, HashMap};

use serde_json::Value;
use thiserror::Error;

use crate::catalog::validation::{validate_definition, ValidationIssue};
use crate::error::ModelError;
use crate::model::{ApiDefinition, ApiGroup, Editor, FieldPath, Form, Raw, Wire};
use crate::serializer::Hydrate;

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("api name {name:?} is already registered in group {group:?}")]
    NameExists { group: String, name: String },

    #[error("api endpoint {endpoint:?} is already registered in group {group:?}")]
    EndpointExists { group: String, endpoint: String },

    #[error("group {0:?} not found")]
    GroupNotFound(String),

    #[error("api definition {name:?} not found in group {group:?}")]
    DefinitionNotFound { group: String, name: String },

    #[error("expected a JSON array of groups, found {0}")]
    NotAnArray(&'static str),

    #[error("invalid api definition: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),

    #[error(transparent)]
    Model(#[from] ModelError),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

fn same(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

// Blank values are left to `validate_definition`.
fn check_unique(
    seen: &mut HashMap<String, FieldPath>,
    value: &str,
    path: FieldPath,
    what: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    if value.trim().is_empty() {
        return;
    }
    match seen.entry(value.to_ascii_lowercase()) {
        Entry::Occupied(first) => {
            tracing::debug!(field = %path, first = %first.get(), "duplicate {what}");
            issues.push(ValidationIssue {
                message: format!("{what} {value:?} duplicates `{}`", first.get()),
                path,
            });
        }
        Entry::Vacant(slot) => {
            slot.insert(path);
        }
    }
}

/// Groups of definitions as edited by the admin UI.
///
/// Definition names are unique within a group and endpoints are unique
/// across all groups, both compared case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<F: Form> {
    groups: Vec<ApiGroup<F>>,
}

impl<F: Form> Default for Catalog<F> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<F: Form> Catalog<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups(groups: Vec<ApiGroup<F>>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[ApiGroup<F>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<ApiGroup<F>> {
        self.groups
    }

    pub fn group(&self, name: &str) -> Option<&ApiGroup<F>> {
        self.groups.iter().find(|g| same(&g.name, name))
    }

    fn group_mut(&mut self, name: &str) -> Option<&mut ApiGroup<F>> {
        self.groups.iter_mut().find(|g| same(&g.name, name))
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Every definition across all groups, in group order.
    pub fn definitions(&self) -> impl Iterator<Item = &ApiDefinition<F>> {
        self.groups.iter().flat_map(|g| g.definitions.iter())
    }

    pub fn find_by_name(&self, group: &str, name: &str) -> Option<&ApiDefinition<F>> {
        self.group(group)?
            .definitions
            .iter()
            .find(|d| same(&d.name, name))
    }

    /// Look up a definition by listen path in any group.
    pub fn find_by_endpoint(&self, endpoint: &str) -> Option<(&ApiGroup<F>, &ApiDefinition<F>)> {
        self.groups.iter().find_map(|g| {
            g.definitions
                .iter()
                .find(|d| same(&d.endpoint, endpoint))
                .map(|d| (g, d))
        })
    }

    fn endpoint_owner(&self, endpoint: &str, except: Option<(&str, &str)>) -> Option<&str> {
        self.groups.iter().find_map(|g| {
            g.definitions
                .iter()
                .filter(|d| match except {
                    Some((group, name)) => !(same(&g.name, group) && same(&d.name, name)),
                    None => true,
                })
                .find(|d| same(&d.endpoint, endpoint))
                .map(|_| g.name.as_str())
        })
    }

    /// Add a definition, creating the group when it does not exist yet.
    pub fn add_definition(&mut self, group: &str, def: ApiDefinition<F>) -> CatalogResult<()> {
        validate_definition(&def).map_err(CatalogError::Invalid)?;

        if self.find_by_name(group, &def.name).is_some() {
            tracing::warn!(group, name = %def.name, "duplicate api name rejected");
            return Err(CatalogError::NameExists {
                group: group.to_string(),
                name: def.name,
            });
        }
        if let Some(owner) = self.endpoint_owner(&def.endpoint, None) {
            tracing::warn!(group = owner, endpoint = %def.endpoint, "duplicate endpoint rejected");
            return Err(CatalogError::EndpointExists {
                group: owner.to_string(),
                endpoint: def.endpoint,
            });
        }

        tracing::debug!(group, name = %def.name, endpoint = %def.endpoint, "api definition added");
        match self.group_mut(group) {
            Some(g) => g.definitions.push(def),
            None => {
                let mut g = ApiGroup::new(group);
                g.definitions.push(def);
                self.groups.push(g);
            }
        }
        Ok(())
    }

    /// Replace the definition with the same name in `group`.
    pub fn update_definition(&mut self, group: &str, def: ApiDefinition<F>) -> CatalogResult<()> {
        validate_definition(&def).map_err(CatalogError::Invalid)?;

        if let Some(owner) = self.endpoint_owner(&def.endpoint, Some((group, &def.name))) {
            tracing::warn!(group = owner, endpoint = %def.endpoint, "duplicate endpoint rejected");
            return Err(CatalogError::EndpointExists {
                group: owner.to_string(),
                endpoint: def.endpoint,
            });
        }

        let g = self
            .group_mut(group)
            .ok_or_else(|| CatalogError::GroupNotFound(group.to_string()))?;
        let slot = g
            .definitions
            .iter_mut()
            .find(|d| same(&d.name, &def.name))
            .ok_or_else(|| CatalogError::DefinitionNotFound {
                group: group.to_string(),
                name: def.name.clone(),
            })?;

        tracing::debug!(group, name = %def.name, "api definition updated");
        *slot = def;
        Ok(())
    }

    /// Remove and return the named definition.
    pub fn remove_definition(&mut self, group: &str, name: &str) -> CatalogResult<ApiDefinition<F>> {
        let g = self
            .group_mut(group)
            .ok_or_else(|| CatalogError::GroupNotFound(group.to_string()))?;
        let index = g
            .definitions
            .iter()
            .position(|d| same(&d.name, name))
            .ok_or_else(|| CatalogError::DefinitionNotFound {
                group: group.to_string(),
                name: name.to_string(),
            })?;

        tracing::debug!(group, name, "api definition removed");
        Ok(g.definitions.remove(index))
    }

    pub fn remove_group(&mut self, name: &str) -> CatalogResult<ApiGroup<F>> {
        let index = self
            .groups
            .iter()
            .position(|g| same(&g.name, name))
            .ok_or_else(|| CatalogError::GroupNotFound(name.to_string()))?;
        Ok(self.groups.remove(index))
    }

    /// Validate every definition and the uniqueness rules, returning issues
    /// keyed by group and definition path.
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        let mut group_names: HashMap<String, FieldPath> = HashMap::new();
        let mut endpoints: HashMap<String, FieldPath> = HashMap::new();

        for (gi, group) in self.groups.iter().enumerate() {
            let group_path = FieldPath::root().index(gi);
            check_unique(
                &mut group_names,
                &group.name,
                group_path.field("name"),
                "group name",
                &mut issues,
            );

            let mut def_names: HashMap<String, FieldPath> = HashMap::new();
            for (di, def) in group.definitions.iter().enumerate() {
                let def_path = group_path.field("definitions").index(di);
                if let Err(found) = validate_definition(def) {
                    issues.extend(found.into_iter().map(|issue| ValidationIssue {
                        path: def_path.join(&issue.path),
                        message: issue.message,
                    }));
                }
                check_unique(&mut def_names, &def.name, def_path.field("name"), "api name", &mut issues);
                check_unique(
                    &mut endpoints,
                    &def.endpoint,
                    def_path.field("endpoint"),
                    "endpoint",
                    &mut issues,
                );
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

impl Catalog<Editor> {
    /// Hydrate a stored JSON array of groups into editor form.
    pub fn load(raw: &Value) -> CatalogResult<Self> {
        let Value::Array(items) = raw else {
            return Err(CatalogError::NotAnArray(match raw {
                Value::Object(_) => "object",
                Value::String(_) => "string",
                Value::Null => "null",
                _ => "scalar",
            }));
        };

        let groups = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = FieldPath::root().index(i);
                ApiGroup::<Raw>::hydrate(item, &path)?
                    .receive_adjust()
                    .map_err(|e| CatalogError::from(e.within(&path)))
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        tracing::debug!(groups = groups.len(), "catalog loaded");
        Ok(Self { groups })
    }

    /// Convert every group to wire form for storage.
    pub fn into_wire(self) -> CatalogResult<Catalog<Wire>> {
        let groups = self
            .groups
            .into_iter()
            .map(|g| g.send_adjust())
            .collect::<Result<Vec<_>, ModelError>>()?;
        Ok(Catalog { groups })
    }
}
