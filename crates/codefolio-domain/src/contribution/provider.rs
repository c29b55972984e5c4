use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Third-party services a profile can be linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Github,
    Codeforces,
    Leetcode,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Github, Provider::Codeforces, Provider::Leetcode];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Github => "github",
            Provider::Codeforces => "codeforces",
            Provider::Leetcode => "leetcode",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Github => "GitHub",
            Provider::Codeforces => "Codeforces",
            Provider::Leetcode => "LeetCode",
        };
        f.write_str(name)
    }
}

impl FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(Provider::Github),
            "codeforces" => Ok(Provider::Codeforces),
            "leetcode" => Ok(Provider::Leetcode),
            other => Err(DomainError::InvalidInput(format!("Unknown provider: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_case_insensitive() {
        assert_eq!("GitHub".parse::<Provider>().unwrap(), Provider::Github);
        assert_eq!("leetcode".parse::<Provider>().unwrap(), Provider::Leetcode);
        assert!("gitlab".parse::<Provider>().is_err());
    }
}
