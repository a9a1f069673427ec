//! Email canonicalization.
//!
//! Two spellings of the same mailbox must map to one account, so addresses are
//! normalized before they are stored or looked up.

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];

const OUTLOOK_DOMAINS: &[&str] = &[
    "hotmail.at", "hotmail.be", "hotmail.ca", "hotmail.cl", "hotmail.co.il", "hotmail.co.nz",
    "hotmail.co.th", "hotmail.co.uk", "hotmail.com", "hotmail.com.ar", "hotmail.com.au",
    "hotmail.com.br", "hotmail.com.gr", "hotmail.com.mx", "hotmail.com.pe", "hotmail.com.tr",
    "hotmail.com.vn", "hotmail.cz", "hotmail.de", "hotmail.dk", "hotmail.es", "hotmail.fr",
    "hotmail.hu", "hotmail.id", "hotmail.ie", "hotmail.in", "hotmail.it", "hotmail.jp",
    "hotmail.kr", "hotmail.lv", "hotmail.my", "hotmail.ph", "hotmail.pt", "hotmail.sa",
    "hotmail.sg", "hotmail.sk", "live.be", "live.co.uk", "live.com", "live.com.ar",
    "live.com.mx", "live.de", "live.es", "live.eu", "live.fr", "live.it", "live.nl", "msn.com",
    "outlook.at", "outlook.be", "outlook.cl", "outlook.co.il", "outlook.co.nz", "outlook.co.th",
    "outlook.com", "outlook.com.ar", "outlook.com.au", "outlook.com.br", "outlook.com.gr",
    "outlook.com.pe", "outlook.com.tr", "outlook.com.vn", "outlook.cz", "outlook.de",
    "outlook.dk", "outlook.es", "outlook.fr", "outlook.hu", "outlook.id", "outlook.ie",
    "outlook.in", "outlook.it", "outlook.jp", "outlook.kr", "outlook.lv", "outlook.my",
    "outlook.ph", "outlook.pt", "outlook.sa", "outlook.sg", "outlook.sk", "passport.com",
];

const YAHOO_DOMAINS: &[&str] = &[
    "rocketmail.com", "yahoo.ca", "yahoo.co.uk", "yahoo.com", "yahoo.de", "yahoo.fr",
    "yahoo.in", "yahoo.it", "ymail.com",
];

const ICLOUD_DOMAINS: &[&str] = &["icloud.com", "me.com"];

const YANDEX_DOMAINS: &[&str] = &[
    "yandex.ru", "yandex.ua", "yandex.kz", "yandex.com", "yandex.by", "ya.ru",
];

/// Mail providers whose addresses have aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Gmail,
    Outlook,
    Yahoo,
    Icloud,
    Yandex,
}

impl Provider {
    fn of(domain: &str) -> Option<Self> {
        [
            (GMAIL_DOMAINS, Self::Gmail),
            (OUTLOOK_DOMAINS, Self::Outlook),
            (YAHOO_DOMAINS, Self::Yahoo),
            (ICLOUD_DOMAINS, Self::Icloud),
            (YANDEX_DOMAINS, Self::Yandex),
        ]
        .into_iter()
        .find_map(|(domains, provider)| domains.contains(&domain).then_some(provider))
    }

    /// Returns the canonical mailbox, or `None` if nothing is left of the local part.
    fn canonical(self, local: &str, domain: &str) -> Option<(String, String)> {
        let (local, domain) = match self {
            Self::Gmail => {
                let base = before_plus(local).replace('.', "");
                (base, "gmail.com")
            }
            Self::Outlook | Self::Icloud => (before_plus(local).to_string(), domain),
            Self::Yahoo => {
                let base = local.rsplit_once('-').map_or(local, |(base, _)| base);
                (base.to_string(), domain)
            }
            Self::Yandex => (local.to_string(), "yandex.ru"),
        };

        (!local.is_empty()).then(|| (local, domain.to_string()))
    }
}

fn before_plus(local: &str) -> &str {
    local.split_once('+').map_or(local, |(base, _)| base)
}

/// Normalizes an email address for storage and lookup.
///
/// The whole address is trimmed and lowercased. Sub-addresses are then folded
/// for the providers that support them:
///
/// - Gmail: dots and any `+tag` are dropped, `googlemail.com` becomes `gmail.com`.
/// - Outlook/Hotmail/Live and iCloud: any `+tag` is dropped.
/// - Yahoo: the last `-tag` is dropped.
/// - Yandex: every Yandex domain becomes `yandex.ru`.
///
/// Input without an `@`, or whose local part would become empty, is returned
/// trimmed and lowercased.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    let lowered = email.trim().to_lowercase();
    let Some((local, domain)) = lowered.rsplit_once('@') else {
        return lowered;
    };

    match Provider::of(domain).and_then(|provider| provider.canonical(local, domain)) {
        Some((local, domain)) => format!("{local}@{domain}"),
        None => lowered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("User@Example.COM", "user@example.com")]
    #[case("  spaced@example.com ", "spaced@example.com")]
    #[case("first.last+promo@example.com", "first.last+promo@example.com")]
    #[case("first-last@example.com", "first-last@example.com")]
    #[case("First.Last+promo@Gmail.com", "firstlast@gmail.com")]
    #[case("a.b.c@googlemail.com", "abc@gmail.com")]
    #[case("John+tag@outlook.com", "john@outlook.com")]
    #[case("john.doe+x@Hotmail.co.uk", "john.doe@hotmail.co.uk")]
    #[case("john+tag@live.com", "john@live.com")]
    #[case("John+tag@icloud.com", "john@icloud.com")]
    #[case("John-tag@yahoo.com", "john@yahoo.com")]
    #[case("mary-ann-work@ymail.com", "mary-ann@ymail.com")]
    #[case("john+tag@yahoo.com", "john+tag@yahoo.com")]
    #[case("ivan@ya.ru", "ivan@yandex.ru")]
    #[case("+only@outlook.com", "+only@outlook.com")]
    #[case("no-at-sign", "no-at-sign")]
    fn test_normalize_email(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_email(input), expected);
    }

    #[rstest]
    #[case("Jane.Doe+x@GoogleMail.com")]
    #[case("jane+x@outlook.com")]
    #[case("jane+x@me.com")]
    fn test_normalization_is_idempotent(#[case] input: &str) {
        let once = normalize_email(input);
        assert_eq!(normalize_email(&once), once);
    }

    #[test]
    fn test_aliases_share_one_account() {
        assert_eq!(
            normalize_email("john+tag@outlook.com"),
            normalize_email("John@Outlook.com")
        );
    }
}
