//! Search query extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use common::AppError;
use domain::SearchError;

/// The single `field=value` pair of a search request.
///
/// Zero pairs is [`SearchError::MissingFilter`]; more than one, even for the
/// same key, is [`SearchError::MultipleFilters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub filter: String,
    pub value: String,
}

impl SearchParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, SearchError> {
        let mut pairs = pairs.into_iter();
        match (pairs.next(), pairs.next()) {
            (None, _) => Err(SearchError::MissingFilter),
            (Some(_), Some(_)) => Err(SearchError::MultipleFilters),
            (Some((filter, value)), None) => Ok(Self { filter, value }),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation("query", e.body_text()))?;

        Ok(Self::from_pairs(pairs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_exactly_one_pair() {
        assert_eq!(
            SearchParams::from_pairs(pairs(&[("status", "done")])).unwrap(),
            SearchParams {
                filter: "status".into(),
                value: "done".into()
            }
        );
        assert_eq!(SearchParams::from_pairs(vec![]), Err(SearchError::MissingFilter));
        assert_eq!(
            SearchParams::from_pairs(pairs(&[("title", "a"), ("title", "b")])),
            Err(SearchError::MultipleFilters)
        );
    }
}
