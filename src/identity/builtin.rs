// src/identity/builtin.rs

/// (NOC, display name, iso2). Empty iso2 = no flag.
pub static NOCS: &[(&str, &str, &str)] = &[
    ("AIN", "Individual Neutral Athletes", ""),
    ("ARG", "Argentina", "ar"),
    ("AUS", "Australia", "au"),
    ("AUT", "Austria", "at"),
    ("BEL", "Belgium", "be"),
    ("BRA", "Brazil", "br"),
    ("BUL", "Bulgaria", "bg"),
    ("CAN", "Canada", "ca"),
    ("CHI", "Chile", "cl"),
    ("CHN", "China", "cn"),
    ("CRO", "Croatia", "hr"),
    ("CZE", "Czech Republic", "cz"),
    ("DEN", "Denmark", "dk"),
    ("ESP", "Spain", "es"),
    ("EST", "Estonia", "ee"),
    ("FIN", "Finland", "fi"),
    ("FRA", "France", "fr"),
    ("GBR", "Great Britain", "gb"),
    ("GEO", "Georgia", "ge"),
    ("GER", "Germany", "de"),
    ("GRE", "Greece", "gr"),
    ("HKG", "Hong Kong", "hk"),
    ("HUN", "Hungary", "hu"),
    ("IND", "India", "in"),
    ("IRL", "Ireland", "ie"),
    ("ISR", "Israel", "il"),
    ("ITA", "Italy", "it"),
    ("JAM", "Jamaica", "jm"),
    ("JPN", "Japan", "jp"),
    ("KAZ", "Kazakhstan", "kz"),
    ("KEN", "Kenya", "ke"),
    ("KOR", "South Korea", "kr"),
    ("LAT", "Latvia", "lv"),
    ("LIE", "Liechtenstein", "li"),
    ("LTU", "Lithuania", "lt"),
    ("MEX", "Mexico", "mx"),
    ("NED", "Netherlands", "nl"),
    ("NOR", "Norway", "no"),
    ("NZL", "New Zealand", "nz"),
    ("POL", "Poland", "pl"),
    ("POR", "Portugal", "pt"),
    ("PRK", "North Korea", "kp"),
    ("ROU", "Romania", "ro"),
    ("RSA", "South Africa", "za"),
    ("SLO", "Slovenia", "si"),
    ("SUI", "Switzerland", "ch"),
    ("SVK", "Slovakia", "sk"),
    ("SWE", "Sweden", "se"),
    ("TPE", "Chinese Taipei", "tw"),
    ("TUR", "Türkiye", "tr"),
    ("UKR", "Ukraine", "ua"),
    ("USA", "United States", "us"),
];

/// Alternate renderings seen on standings pages.
pub static ALIASES: &[(&str, &str)] = &[
    ("Czechia", "CZE"),
    ("Great Britain and Northern Ireland", "GBR"),
    ("United Kingdom", "GBR"),
    ("Korea", "KOR"),
    ("Republic of Korea", "KOR"),
    ("Hong Kong, China", "HKG"),
    ("People's Republic of China", "CHN"),
    ("Turkey", "TUR"),
    ("United States of America", "USA"),
];
