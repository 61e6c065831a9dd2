/// External destinations a budget summary can be shared to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    WhatsApp,
    Email,
}

impl std::str::FromStr for ShareTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whatsapp" | "wa" => Ok(ShareTarget::WhatsApp),
            "email" | "mail" => Ok(ShareTarget::Email),
            _ => Err(format!(
                "Invalid share target: {}. Please specify 'whatsapp' or 'email'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShareTarget::WhatsApp => write!(f, "whatsapp"),
            ShareTarget::Email => write!(f, "email"),
        }
    }
}
