//! Credential descriptions accepted by the connector

use std::collections::HashMap;

use super::{ConnectError, SessionParams};
use crate::constants::DEFAULT_AWS_REGION;

/// Keyword selecting the AssumeRole path in a keyword map
pub const ACCOUNT_ID_KEYWORD: &str = "aws_account_id";

/// What a caller knows about the credentials to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectSpec {
    /// Default profile and region resolution chain
    Default,
    /// Default profile pinned to a region
    Region { region: String },
    /// Named profile pinned to a region
    Profile { region: String, profile: String },
    /// Static access keys, optionally with a session token
    Keys {
        region: String,
        access_key: String,
        secret_key: String,
        session_token: Option<String>,
    },
    /// Customer account reached through the AssumeRole chain
    AssumeRole {
        account_id: String,
        role_name: Option<String>,
        region: Option<String>,
    },
    /// Constructor arguments passed through as given
    Params(SessionParams),
}

impl ConnectSpec {
    /// Build from a `Region`/`AccessKey`/`SecretKey`[/`TokenKey`] map
    pub fn from_key_map(map: &HashMap<String, String>) -> Result<Self, ConnectError> {
        let required = |key: &'static str| {
            map.get(key)
                .cloned()
                .ok_or(ConnectError::MissingKey(key))
        };

        Ok(Self::Keys {
            region: required("Region")?,
            access_key: required("AccessKey")?,
            secret_key: required("SecretKey")?,
            session_token: map.get("TokenKey").cloned(),
        })
    }

    /// Build from session constructor keywords
    ///
    /// `aws_account_id` switches to the AssumeRole path, where only
    /// `region_name` may accompany it. An explicit `region` wins over a
    /// `region_name` keyword; with neither, the default region applies.
    pub fn from_keywords(
        map: &HashMap<String, String>,
        region: Option<&str>,
    ) -> Result<Self, ConnectError> {
        if let Some(account_id) = map.get(ACCOUNT_ID_KEYWORD) {
            if let Some(other) = map
                .keys()
                .find(|key| !matches!(key.as_str(), ACCOUNT_ID_KEYWORD | "region_name"))
            {
                return Err(ConnectError::UnknownKeyword(other.clone()));
            }

            let region = region
                .or(map.get("region_name").map(String::as_str))
                .unwrap_or(DEFAULT_AWS_REGION);
            return Ok(Self::AssumeRole {
                account_id: account_id.clone(),
                role_name: None,
                region: Some(region.to_string()),
            });
        }

        let mut params = SessionParams::default();
        for (key, value) in map {
            let slot = match key.as_str() {
                "region_name" => &mut params.region_name,
                "profile_name" => &mut params.profile_name,
                "aws_access_key_id" => &mut params.aws_access_key_id,
                "aws_secret_access_key" => &mut params.aws_secret_access_key,
                "aws_session_token" => &mut params.aws_session_token,
                other => return Err(ConnectError::UnknownKeyword(other.to_string())),
            };
            *slot = Some(value.clone());
        }

        params.region_name = region
            .map(str::to_string)
            .or(params.region_name)
            .or_else(|| Some(DEFAULT_AWS_REGION.to_string()));

        Ok(Self::Params(params))
    }

    /// Constructor arguments for this spec; `None` for the AssumeRole path
    pub fn session_params(&self) -> Option<SessionParams> {
        let params = match self {
            Self::Default => SessionParams::default(),
            Self::Region { region } => SessionParams {
                region_name: Some(region.clone()),
                ..SessionParams::default()
            },
            Self::Profile { region, profile } => SessionParams::from_profile(profile, region),
            Self::Keys {
                region,
                access_key,
                secret_key,
                session_token,
            } => SessionParams {
                region_name: Some(region.clone()),
                profile_name: None,
                aws_access_key_id: Some(access_key.clone()),
                aws_secret_access_key: Some(secret_key.clone()),
                aws_session_token: session_token.clone(),
            },
            Self::Params(params) => params.clone(),
            Self::AssumeRole { .. } => return None,
        };
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_key_map_with_token() {
        let spec = ConnectSpec::from_key_map(&map(&[
            ("Region", "us-west-2"),
            ("AccessKey", "AKIA1"),
            ("SecretKey", "s3cr3t"),
            ("TokenKey", "tok"),
        ]))
        .unwrap();

        let params = spec.session_params().unwrap();
        assert_eq!(params.region_name.as_deref(), Some("us-west-2"));
        assert_eq!(params.aws_access_key_id.as_deref(), Some("AKIA1"));
        assert_eq!(params.aws_secret_access_key.as_deref(), Some("s3cr3t"));
        assert_eq!(params.aws_session_token.as_deref(), Some("tok"));
        assert_eq!(params.profile_name, None);
    }

    #[test]
    fn test_key_map_without_token() {
        let spec = ConnectSpec::from_key_map(&map(&[
            ("Region", "us-west-2"),
            ("AccessKey", "AKIA1"),
            ("SecretKey", "s3cr3t"),
        ]))
        .unwrap();

        let params = spec.session_params().unwrap();
        assert_eq!(params.aws_session_token, None);
        assert!(params.has_static_keys());
    }

    #[test]
    fn test_key_map_missing_required_key() {
        let err = ConnectSpec::from_key_map(&map(&[("Region", "us-west-2"), ("AccessKey", "A")]))
            .unwrap_err();
        assert_eq!(err, ConnectError::MissingKey("SecretKey"));

        let err = ConnectSpec::from_key_map(&HashMap::new()).unwrap_err();
        assert_eq!(err, ConnectError::MissingKey("Region"));
    }

    #[test]
    fn test_keywords_with_account_id_use_default_region() {
        let spec =
            ConnectSpec::from_keywords(&map(&[("aws_account_id", "123456789012")]), None).unwrap();
        assert_eq!(
            spec,
            ConnectSpec::AssumeRole {
                account_id: "123456789012".to_string(),
                role_name: None,
                region: Some("ap-northeast-2".to_string()),
            }
        );
        assert_eq!(spec.session_params(), None);
    }

    #[test]
    fn test_keywords_with_account_id_keep_given_region() {
        let spec = ConnectSpec::from_keywords(
            &map(&[("aws_account_id", "123456789012")]),
            Some("us-east-1"),
        )
        .unwrap();
        match spec {
            ConnectSpec::AssumeRole { region, .. } => {
                assert_eq!(region.as_deref(), Some("us-east-1"));
            }
            other => panic!("Expected AssumeRole, got {other:?}"),
        }
    }

    #[test]
    fn test_keywords_with_account_id_honour_region_name() {
        let keywords = map(&[
            ("aws_account_id", "123456789012"),
            ("region_name", "us-east-1"),
        ]);

        let spec = ConnectSpec::from_keywords(&keywords, None).unwrap();
        assert_eq!(
            spec,
            ConnectSpec::AssumeRole {
                account_id: "123456789012".to_string(),
                role_name: None,
                region: Some("us-east-1".to_string()),
            }
        );

        match ConnectSpec::from_keywords(&keywords, Some("eu-west-3")).unwrap() {
            ConnectSpec::AssumeRole { region, .. } => {
                assert_eq!(region.as_deref(), Some("eu-west-3"));
            }
            other => panic!("Expected AssumeRole, got {other:?}"),
        }
    }

    #[test]
    fn test_keywords_with_account_id_reject_unknown() {
        let err = ConnectSpec::from_keywords(
            &map(&[
                ("aws_account_id", "123456789012"),
                ("region_name", "us-east-1"),
                ("bogus_keyword", "x"),
            ]),
            None,
        )
        .unwrap_err();
        assert_eq!(err, ConnectError::UnknownKeyword("bogus_keyword".to_string()));

        let err = ConnectSpec::from_keywords(
            &map(&[("aws_account_id", "123456789012"), ("profile_name", "dev")]),
            None,
        )
        .unwrap_err();
        assert_eq!(err, ConnectError::UnknownKeyword("profile_name".to_string()));
    }

    #[test]
    fn test_keywords_pass_through_merged_with_region() {
        let spec = ConnectSpec::from_keywords(
            &map(&[
                ("aws_access_key_id", "AKIA2"),
                ("aws_secret_access_key", "secret2"),
            ]),
            Some("eu-central-1"),
        )
        .unwrap();

        let params = spec.session_params().unwrap();
        assert_eq!(params.region_name.as_deref(), Some("eu-central-1"));
        assert_eq!(params.aws_access_key_id.as_deref(), Some("AKIA2"));
        assert_eq!(params.aws_secret_access_key.as_deref(), Some("secret2"));
        assert_eq!(params.aws_session_token, None);
    }

    #[test]
    fn test_keywords_region_precedence() {
        let keywords = map(&[("profile_name", "dev"), ("region_name", "sa-east-1")]);

        let params = ConnectSpec::from_keywords(&keywords, None)
            .unwrap()
            .session_params()
            .unwrap();
        assert_eq!(params.region_name.as_deref(), Some("sa-east-1"));
        assert_eq!(params.profile_name.as_deref(), Some("dev"));

        let params = ConnectSpec::from_keywords(&keywords, Some("us-east-2"))
            .unwrap()
            .session_params()
            .unwrap();
        assert_eq!(params.region_name.as_deref(), Some("us-east-2"));

        let params = ConnectSpec::from_keywords(&map(&[("profile_name", "dev")]), None)
            .unwrap()
            .session_params()
            .unwrap();
        assert_eq!(params.region_name.as_deref(), Some(DEFAULT_AWS_REGION));
    }

    #[test]
    fn test_keywords_reject_unknown() {
        let err = ConnectSpec::from_keywords(&map(&[("botocore_session", "x")]), None).unwrap_err();
        assert_eq!(err, ConnectError::UnknownKeyword("botocore_session".to_string()));
    }

    #[test]
    fn test_session_params_per_variant() {
        assert_eq!(
            ConnectSpec::Default.session_params(),
            Some(SessionParams::default())
        );

        let params = ConnectSpec::Region {
            region: "ap-south-1".to_string(),
        }
        .session_params()
        .unwrap();
        assert_eq!(params.region_name.as_deref(), Some("ap-south-1"));
        assert_eq!(params.profile_name, None);
        assert!(!params.has_static_keys());

        let params = ConnectSpec::Profile {
            region: "ap-south-1".to_string(),
            profile: "ops".to_string(),
        }
        .session_params()
        .unwrap();
        assert_eq!(params.region_name.as_deref(), Some("ap-south-1"));
        assert_eq!(params.profile_name.as_deref(), Some("ops"));
        assert!(!params.has_static_keys());

        let params = ConnectSpec::Keys {
            region: "ap-south-1".to_string(),
            access_key: "AKIA3".to_string(),
            secret_key: "secret3".to_string(),
            session_token: None,
        }
        .session_params()
        .unwrap();
        assert_eq!(params.aws_access_key_id.as_deref(), Some("AKIA3"));
        assert_eq!(params.aws_secret_access_key.as_deref(), Some("secret3"));
        assert_eq!(params.aws_session_token, None);
        assert_eq!(params.profile_name, None);
    }
}
