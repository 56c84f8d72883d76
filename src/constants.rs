use std::{env, path::PathBuf};

/// Section of the AWS config file holding connector settings
pub const CONFIG_SECTION_NAME: &str = "nds-connect";

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS configuration file name
pub const AWS_CONFIG_FILE_NAME: &str = "config";

/// AWS shared credentials file name
pub const AWS_CREDENTIALS_FILE_NAME: &str = "credentials";

/// Region used when a caller does not pin one
pub const DEFAULT_AWS_REGION: &str = "ap-northeast-2";

/// Role assumed inside customer accounts
pub const DEFAULT_ASSUME_ROLE_NAME: &str = "NdsManagingRole";

/// Account owning the intermediary role used by the test-local bootstrap hop
pub const OPERATOR_ACCOUNT_ID: &str = "655457307385";

/// Intermediary role assumed first on the test-local platform
pub const INTERMEDIARY_ROLE_NAME: &str = "KimjeheonManagingRole";

/// Profile the root session is opened with in production
pub const ROOT_PROFILE_NAME: &str = "sts-to-nds-role";

/// Profile the root session is opened with on the test-local platform
pub const BOOTSTRAP_PROFILE_NAME: &str = "assume-role-only-user";

/// Environment variable forcing the test-local platform
pub const TEST_LOCAL_PLATFORM_ENV: &str = "NDS_TEST_LOCAL_PLATFORM";

/// Prefix of every STS role session name issued by this tool
pub const ROLE_SESSION_NAME_PREFIX: &str = "nds-connect";

/// Get the AWS config file path
/// Respects AWS_CONFIG_FILE environment variable if set
pub fn get_aws_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("AWS_CONFIG_FILE") {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(AWS_CONFIG_FILE_NAME))
}

/// Get the AWS credentials file path
/// Respects AWS_SHARED_CREDENTIALS_FILE environment variable if set
pub fn get_aws_credentials_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("AWS_SHARED_CREDENTIALS_FILE") {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| {
        home.join(AWS_CONFIG_DIR_NAME)
            .join(AWS_CREDENTIALS_FILE_NAME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_get_aws_config_path_with_env() {
        let original = env::var("AWS_CONFIG_FILE").ok();

        unsafe {
            env::set_var("AWS_CONFIG_FILE", "/custom/aws/config");
        }
        let path = get_aws_config_path();
        assert_eq!(path, Some(PathBuf::from("/custom/aws/config")));

        unsafe {
            match original {
                Some(val) => env::set_var("AWS_CONFIG_FILE", val),
                None => env::remove_var("AWS_CONFIG_FILE"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_get_aws_config_path_default() {
        let original = env::var("AWS_CONFIG_FILE").ok();

        unsafe {
            env::remove_var("AWS_CONFIG_FILE");
        }
        let path = get_aws_config_path();

        if let Some(p) = path {
            let path_str = p.to_string_lossy();
            assert!(path_str.contains(AWS_CONFIG_DIR_NAME));
            assert!(path_str.ends_with(AWS_CONFIG_FILE_NAME));
        }

        unsafe {
            if let Some(val) = original {
                env::set_var("AWS_CONFIG_FILE", val);
            }
        }
    }

    #[test]
    #[serial]
    fn test_get_aws_credentials_path_with_env() {
        let original = env::var("AWS_SHARED_CREDENTIALS_FILE").ok();

        unsafe {
            env::set_var("AWS_SHARED_CREDENTIALS_FILE", "/custom/path/credentials");
        }
        let path = get_aws_credentials_path();
        assert_eq!(path, Some(PathBuf::from("/custom/path/credentials")));

        unsafe {
            match original {
                Some(val) => env::set_var("AWS_SHARED_CREDENTIALS_FILE", val),
                None => env::remove_var("AWS_SHARED_CREDENTIALS_FILE"),
            }
        }
    }

    #[test]
    fn test_default_identifiers() {
        assert_eq!(DEFAULT_AWS_REGION, "ap-northeast-2");
        assert_eq!(DEFAULT_ASSUME_ROLE_NAME, "NdsManagingRole");
        assert_eq!(OPERATOR_ACCOUNT_ID.len(), 12);
    }
}
