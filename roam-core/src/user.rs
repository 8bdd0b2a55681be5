use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub number: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub number: Option<String>,
}

impl RegisterRequest {
    /// Presence check kept from the registration form: all three fields
    /// must be non-empty.
    pub fn validated(self) -> Option<(String, String, String)> {
        match (self.name, self.email, self.number) {
            (Some(n), Some(e), Some(num))
                if !n.trim().is_empty() && !e.trim().is_empty() && !num.trim().is_empty() =>
            {
                Some((n, e, num))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_all_fields() {
        let req = RegisterRequest {
            name: Some("Asha".into()),
            email: None,
            number: Some("98".into()),
        };
        assert!(req.validated().is_none());

        let req = RegisterRequest {
            name: Some("Asha".into()),
            email: Some("a@x.com".into()),
            number: Some("98".into()),
        };
        assert_eq!(
            req.validated(),
            Some(("Asha".into(), "a@x.com".into(), "98".into()))
        );
    }

    #[test]
    fn register_rejects_blank_fields() {
        let req = RegisterRequest {
            name: Some("  ".into()),
            email: Some("a@x.com".into()),
            number: Some("98".into()),
        };
        assert!(req.validated().is_none());
    }
}
