//! Keyword tables shared by the detectors.
//!
//! The tables target Turkish academic text (theses and journal articles) with
//! English equivalents where sources mix both languages. Keyword lists used
//! inside regexes are compiled once into `LazyLock` statics by their users.

/// Academic titles and institution words, matched case-sensitively.
pub const AFFILIATION_INDICATORS: &[&str] = &[
    "Prof", "Doç", "Yrd", "Arş", "Dr", "Öğr", "Gör", "Üniversite", "Fakülte", "MYO", "Assoc",
    "Assc", "Asst",
];

/// Upper-case forms of the indicators.
///
/// Kept by hand: `to_uppercase` turns `i` into `I` rather than `İ`, so the
/// derived forms would never match Turkish capitals.
pub const AFFILIATION_INDICATORS_UPPER: &[&str] = &[
    "PROF", "DOÇ", "YRD", "ARŞ", "DR", "ÖĞR", "GÖR", "ÜNİVERSİTE", "FAKÜLTE", "ASSOC", "ASST",
];

/// City and district names. Any hit adds one to the affiliation count.
pub const CITIES: &[&str] = &[
    "Adalar", "Adana", "Adıyaman", "Afyonkarahisar", "Ağrı", "Akçaabat", "Akçakale", "Akdeniz",
    "Akhisar", "Aksaray", "Alanya", "Alaşehir", "Altındağ", "Amasya", "Ankara", "Antalya",
    "Ardahan", "Arnavutköy", "Artvin", "Avcılar", "Aydın", "Bağcılar", "Bağlar", "Balıkesir",
    "Bandırma", "Bartın", "Batman", "Battalgazi", "Bayburt", "Bergama", "Beykoz", "Beylikdüzü",
    "Bilecik", "Bingöl", "Bitlis", "Bodrum", "Bolu", "Bornova", "Buca", "Burç", "Burdur",
    "Bursa", "Büyükçekmece", "Çağlayan", "Çanakkale", "Çankaya", "Çankırı", "Çarşamba",
    "Çayırova", "Çekme", "Çerkezköy", "Ceyhan", "Cizre", "Çorlu", "Çorum", "Darıca",
    "Değirmendere", "Denizli", "Diyarbakır", "Doğubayazıt", "Düzce", "Edirne", "Edremit",
    "Elazığ", "Elbistan", "Ereğli", "Erenler", "Ergani", "Erzincan", "Erzurum", "Esenler",
    "Esenyurt", "Eskişehir", "Etimesgut", "Fatsa", "Fethiye", "Gaziantep", "Gaziemir", "Gebze",
    "Giresun", "Gölcük", "Gümüşhane", "Güngören", "Hadımköy", "Hakkari", "Hatay", "Iğdır",
    "İnegöl", "İskenderun", "Isparta", "İstanbul", "Istanbul", "Izmir", "İzmir", "Kadirli",
    "Kağıthane", "Kahramanmaraş", "Kahta", "Kapaklı", "Karadeniz", "Karabük", "Karaköprü",
    "Karaman", "Karatepe", "Kars", "Karşıyaka", "Kartal", "Kastamonu", "Kayapınar", "Kayseri",
    "Kazanlı", "Kazımpaşa", "Keçiören", "Kemalpaşa", "Kemerburgaz", "Kilis", "Kırıkkale",
    "Kırklareli", "Kırşehir", "Kızıltepe", "Kocaeli", "Konak", "Konya", "Körfez", "Kozan",
    "Küçükçekmece", "Kuşadası", "Kütahya", "Lüleburgaz", "Mahmut Şevket Paşa", "Mahmutbey",
    "Malatya", "Mamak", "Manavgat", "Manisa", "Mardin", "Marmara", "Melikgazi", "Menemen",
    "Meram", "Mersin", "Midyat", "Muğla", "Muş", "Nazilli", "Nevşehir", "Niğde", "Nizip",
    "Nusaybin", "Ödemiş", "Ordu", "Osmaniye", "Pamukkale", "Patnos", "Pendik", "Polatlı",
    "Pursaklar", "Rize", "Sakarya", "Salihli", "Samandağ", "Samandıra", "Samsun", "Şanlıurfa",
    "Sarıyer", "Selçuklu", "Serdivan", "Serik", "Seyhan", "Siirt", "Silifke", "Silivri",
    "Silopi", "Sincan", "Sinop", "Şırnak", "Sivas", "Siverek", "Söke", "Soma", "Sultanbeyli",
    "Suruç", "Talas", "Tarsus", "Tavşanlı", "Tekirdağ", "Trakya", "Tokat", "Torbalı", "Trabzon",
    "Tunceli", "Turgutlu", "Tuzla", "Ünye", "Uşak", "Van", "Viranşehir", "Yalova", "Yenice",
    "Yenimahalle", "Yenişehir", "Yeşilyurt", "Yolboyu", "Yozgat", "Yüksekova", "Yüreğir",
    "Zonguldak",
];

/// Labels that open a figure/table caption when followed by a number.
pub const CAPTION_LABELS: &[&str] = &[
    "Tablo", "Şekil", "Fotoğraf", "Figür", "Resim", "Plan", "Nota", "Çizelge", "Grafik",
    "Harita", "Levha", "Ek", "Table", "Figure", "Photo", "Chart", "Appendix", "Plate", "Map",
];

/// Item types that open an entry in a list of tables/figures (case-folded).
pub const INDEX_ITEM_TYPES: &[&str] = &[
    "tablo", "şekil", "grafik", "çizelge", "resim", "harita", "table", "figure", "graph",
    "chart",
];

/// Case-folded endings of index, list and abbreviation headings.
pub const INDEX_HEADINGS: &[&str] = &[
    "dizini",
    "dizin",
    "listesi",
    "içindekiler",
    "kisaltmalar",
    "simgeler",
];

/// Case-folded English headings, recognised only when they fill the line.
///
/// Unlike the Turkish endings these words close ordinary sentences too
/// ("the consumer price index").
pub const INDEX_HEADING_LINES: &[&str] = &[
    "index",
    "contents",
    "table of contents",
    "list of tables",
    "list of figures",
    "abbreviations",
];

/// Case-folded bibliography headings.
pub const BIBLIOGRAPHY_KEYWORDS: &[&str] = &[
    "kaynaklar/references",
    "bibliyoğrafya",
    "bibliyografya",
    "bibliyog",
    "kaynakça",
    "kaynakca",
    "kaynaklar",
    "references",
    "bibliography",
];

/// Persistent identifier markers that never occur in body prose.
pub const DISCARD_TOKENS: &[&str] = &["ORCID", "DOI", "doi.org", "ISSN", "ISBN"];

/// Front/back-matter headings whose page is discarded as a whole.
///
/// Spaces inside a heading match any run of whitespace.
pub const DISCARD_SECTIONS: &[&str] = &[
    "ÖZGEÇMİŞ",
    "ÖNSÖZ",
    "ÖN SÖZ",
    "BEYAN",
    "BİLDİRİM",
    "TEŞEKKÜR",
    "JÜRİ VE ENSTİTÜ ONAYI",
    "ETİK KURUL ONAYI",
    "TEZ ONAY FORMU",
    "TEZ KABUL VE ONAYI",
    "DOĞRULUK BEYANI",
    "KISALTMALAR LİSTESİ",
    "KISALTMALAR",
    "YEMİN",
    "TUTANAK",
    "TEZ BİLDİRİMİ",
    "BİLİMSEL ETİĞE UYGUNLUK",
    "TEZ YAZIM KLAVUZUNA UYGUNLUK",
    "İTHAF",
    "EKLER",
    "ÇİZELGE LİSTESİ",
    "ACKNOWLEDGEMENTS",
    "ACKNOWLEDGMENTS",
    "CURRICULUM VITAE",
    "DEDICATION",
    "ABBREVIATIONS",
];

/// Headings whose section usually fills a whole page on its own.
pub const DISCARD_FULL_PAGE_SECTIONS: &[&str] = &[
    "ÖNSÖZ",
    "ÖN SÖZ",
    "TEŞEKKÜR",
    "PREFACE",
    "ACKNOWLEDGEMENTS",
    "ACKNOWLEDGMENTS",
];

/// Joins keywords into a regex alternation, escaping them.
pub(crate) fn alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Lower-cases a line the way the keyword tables expect.
///
/// `İ` lower-cases to `i` plus a combining dot; the dot is dropped so that
/// `BİBLİYOGRAFYA` folds to `bibliyografya`. Dotless `ı` folds to `i` as
/// well, since `I` cannot be told apart from a Turkish capital, so folded
/// keywords never contain `ı`.
pub fn fold_case(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .replace("i\u{307}", "i")
        .replace('ı', "i")
}
