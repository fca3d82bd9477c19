//! Fetch-result preprocessing before merge

use itertools::Itertools;

use crate::data::FetchResult;

impl FetchResult {
    /// Keep only relations whose scope is in `scopes`. An empty filter keeps
    /// everything; relations without a scope never match a non-empty filter.
    pub fn retain_scopes<S: AsRef<str>>(&mut self, scopes: &[S]) {
        if scopes.is_empty() {
            return;
        }

        let before = self.relations.len();
        self.relations.retain(|relation| {
            relation
                .scope
                .as_deref()
                .is_some_and(|scope| scopes.iter().any(|s| s.as_ref() == scope))
        });

        log::debug!(
            "Scope filter kept {} of {} relations for {}",
            self.relations.len(),
            before,
            self.main_item.id
        );
    }

    /// Distinct non-empty relation categories in encounter order
    pub fn categories(&self) -> Vec<String> {
        self.relations
            .iter()
            .map(|relation| relation.category.as_str())
            .filter(|category| !category.is_empty())
            .unique()
            .map(str::to_string)
            .collect()
    }

    /// Distinct relation scopes in encounter order
    pub fn scopes(&self) -> Vec<String> {
        self.relations
            .iter()
            .filter_map(|relation| relation.scope.as_deref())
            .unique()
            .map(str::to_string)
            .collect()
    }
}
