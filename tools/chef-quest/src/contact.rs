//! "Contact sales" mail-compose intent. Best effort: failures are reported
//! back as an outcome and never interrupt the quest.

use crate::runtime::{ProcessRequest, ProcessRunner};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SALES_EMAIL: &str = "sales@junglejims.com";
pub const DEFAULT_SUBJECT: &str = "Chef Quest Demo";
pub const DEFAULT_INTEREST_SUBJECT: &str = "Chef Quest Demo Interest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesContact {
    pub email: String,
    pub subject: String,
    pub interest_subject: String,
    pub opener: String,
}

impl Default for SalesContact {
    fn default() -> Self {
        Self {
            email: DEFAULT_SALES_EMAIL.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            interest_subject: DEFAULT_INTEREST_SUBJECT.to_string(),
            opener: default_opener().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Footer button, available everywhere.
    General,
    /// "Talk to Sales" on the cooking screen.
    Interest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Opened { url: String },
    Failed { url: String, reason: String },
}

impl ContactOutcome {
    pub fn url(&self) -> &str {
        match self {
            Self::Opened { url } | Self::Failed { url, .. } => url,
        }
    }
}

impl SalesContact {
    pub fn subject_for(&self, kind: ContactKind) -> &str {
        match kind {
            ContactKind::General => &self.subject,
            ContactKind::Interest => &self.interest_subject,
        }
    }

    pub fn mailto(&self, kind: ContactKind) -> String {
        mailto_url(&self.email, self.subject_for(kind))
    }
}

pub fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

pub fn mailto_url(email: &str, subject: &str) -> String {
    format!("mailto:{email}?subject={}", urlencoding::encode(subject))
}

pub fn open_mail_compose(
    runner: &dyn ProcessRunner,
    contact: &SalesContact,
    kind: ContactKind,
) -> ContactOutcome {
    let url = contact.mailto(kind);
    let request = ProcessRequest {
        program: contact.opener.clone(),
        args: vec![url.clone()],
    };
    match runner.spawn_detached(request) {
        Ok(()) => ContactOutcome::Opened { url },
        Err(error) => ContactOutcome::Failed {
            url,
            reason: error.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{mailto_url, open_mail_compose, ContactKind, ContactOutcome, SalesContact};
    use crate::runtime::FakeProcessRunner;

    #[test]
    fn subjects_are_percent_encoded() {
        assert_eq!(
            mailto_url("sales@junglejims.com", "Chef Quest Demo"),
            "mailto:sales@junglejims.com?subject=Chef%20Quest%20Demo"
        );
        assert_eq!(
            mailto_url("a@b.c", "Tajín & co"),
            "mailto:a@b.c?subject=Taj%C3%ADn%20%26%20co"
        );
    }

    #[test]
    fn interest_contact_uses_its_own_subject() {
        let contact = SalesContact::default();
        assert_eq!(
            contact.mailto(ContactKind::Interest),
            "mailto:sales@junglejims.com?subject=Chef%20Quest%20Demo%20Interest"
        );
    }

    #[test]
    fn opener_receives_the_mailto_url() {
        let runner = FakeProcessRunner::default();
        let contact = SalesContact {
            opener: "mail-opener".to_string(),
            ..SalesContact::default()
        };
        let outcome = open_mail_compose(&runner, &contact, ContactKind::General);
        assert!(matches!(outcome, ContactOutcome::Opened { .. }));
        let spawned = runner.spawned();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].program, "mail-opener");
        assert_eq!(spawned[0].args, vec![outcome.url().to_string()]);
    }

    #[test]
    fn spawn_failure_is_reported_not_raised() {
        let runner = FakeProcessRunner::failing();
        let outcome = open_mail_compose(&runner, &SalesContact::default(), ContactKind::General);
        match outcome {
            ContactOutcome::Failed { reason, .. } => assert!(reason.contains("not found")),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
