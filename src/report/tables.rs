//! Static rule tables for report interpretation.
//!
//! Test-name list, reference ranges, topic advisories, and the fixed sentence
//! pools. Declared once as immutable data so the matching behavior can be
//! tested and the tables externalized later without code changes.

/// Lab-test name substrings the observation scan recognizes. Matching is by
/// substring containment against the lowercased label, except that keys of up
/// to three characters must appear as whole words (see `label_contains_key`).
pub const KNOWN_TESTS: &[&str] = &[
    // CBC
    "hemoglobin",
    "haemoglobin",
    "hb",
    "rbc",
    "wbc",
    "total leucocyte",
    "platelet",
    "hematocrit",
    "haematocrit",
    "hct",
    "pcv",
    "mcv",
    "mch",
    "mchc",
    "rdw",
    "neutrophil",
    "lymphocyte",
    "monocyte",
    "eosinophil",
    "basophil",
    // Inflammation
    "esr",
    "crp",
    // Sugar
    "glucose",
    "sugar",
    "fbs",
    "ppbs",
    "rbs",
    "hba1c",
    // Lipid profile
    "cholesterol",
    "triglyceride",
    "hdl",
    "ldl",
    "vldl",
    // Kidney function
    "creatinine",
    "urea",
    "uric acid",
    "bun",
    "sodium",
    "potassium",
    "chloride",
    "calcium",
    "phosphorus",
    // Liver function
    "bilirubin",
    "sgpt",
    "sgot",
    "alt",
    "ast",
    "alkaline phosphatase",
    "alp",
    "albumin",
    "total protein",
    "globulin",
    "ggt",
    // Thyroid
    "tsh",
    "t3",
    "t4",
    // Vitamins and iron
    "vitamin d",
    "vitamin b12",
    "b12",
    "ferritin",
    "iron",
    // Celiac
    "ttg",
];

/// Reference ranges: (test-name key, low, high). A label matches a key by
/// substring containment; the first key in declaration order wins, so more
/// specific keys are declared before keys they contain (hba1c before hb,
/// vitamin b12 before b12, hdl/vldl/ldl before cholesterol so that compound
/// labels like "HDL Cholesterol" hit their own range).
pub const REFERENCE_RANGES: &[(&str, f64, f64)] = &[
    ("hba1c", 4.0, 5.7),
    ("hemoglobin", 12.0, 16.0),
    ("haemoglobin", 12.0, 16.0),
    ("hb", 12.0, 16.0),
    ("glucose", 70.0, 140.0),
    ("fbs", 70.0, 110.0),
    ("ppbs", 70.0, 140.0),
    ("rbs", 70.0, 140.0),
    ("triglyceride", 40.0, 150.0),
    ("hdl", 40.0, 60.0),
    ("vldl", 5.0, 30.0),
    ("ldl", 50.0, 100.0),
    ("cholesterol", 125.0, 200.0),
    ("creatinine", 0.6, 1.4),
    ("uric acid", 3.5, 7.2),
    ("urea", 15.0, 40.0),
    ("bun", 7.0, 20.0),
    ("sodium", 135.0, 145.0),
    ("potassium", 3.5, 5.1),
    ("calcium", 8.5, 10.5),
    ("bilirubin", 0.2, 1.2),
    ("sgpt", 5.0, 40.0),
    ("sgot", 5.0, 40.0),
    ("alkaline phosphatase", 40.0, 130.0),
    ("alp", 40.0, 130.0),
    ("tsh", 0.4, 4.5),
    ("vitamin d", 30.0, 100.0),
    ("vitamin b12", 200.0, 900.0),
    ("b12", 200.0, 900.0),
    ("esr", 0.0, 20.0),
    ("crp", 0.0, 6.0),
    ("ttg", 0.0, 10.0),
    ("ferritin", 20.0, 300.0),
];

/// Topic advisories: (trigger keywords, fixed Hindi sentence). One sentence is
/// emitted per matched topic regardless of any numeric value. The glucose,
/// hemoglobin, cholesterol, and creatinine sentences keep the wording of the
/// production message template.
pub const TOPIC_ADVISORIES: &[(&[&str], &str)] = &[
    (
        &["glucose", "sugar"],
        "ग्लूकोज़ स्तर रिपोर्ट में पाया गया है। अगर यह सामान्य सीमा से ऊपर है, तो यह डायबिटीज का संकेत हो सकता है।",
    ),
    (
        &["hemoglobin", "haemoglobin"],
        "हीमोग्लोबिन स्तर की जाँच की गई है। यह शरीर में खून की गुणवत्ता का संकेत देता है।",
    ),
    (
        &["cholesterol"],
        "कोलेस्ट्रॉल की मात्रा रिपोर्ट में है। अधिक कोलेस्ट्रॉल दिल की बीमारियों का कारण बन सकता है।",
    ),
    (
        &["creatinine"],
        "क्रिएटिनिन किडनी की सेहत का संकेत देता है। इसका स्तर सामान्य होना ज़रूरी है।",
    ),
    (
        &["ttg", "celiac", "coeliac"],
        "TTG जाँच सीलिएक रोग (गेहूँ से एलर्जी) से जुड़ी है। रिपोर्ट डॉक्टर को ज़रूर दिखाएँ।",
    ),
    (
        &["cbc", "complete blood count"],
        "CBC जाँच से खून की कोशिकाओं की पूरी जानकारी मिलती है।",
    ),
    (
        &["esr", "crp"],
        "ESR/CRP शरीर में सूजन या संक्रमण का संकेत दे सकते हैं।",
    ),
    (
        &["lipid profile", "lipid"],
        "लिपिड प्रोफाइल दिल की सेहत से जुड़ी जाँच है। खान-पान का ध्यान रखें।",
    ),
    (
        &["lft", "liver function"],
        "LFT जाँच लीवर की कार्यक्षमता बताती है।",
    ),
    (
        &["kft", "kidney function", "rft"],
        "KFT जाँच किडनी की कार्यक्षमता बताती है। पर्याप्त पानी पीना ज़रूरी है।",
    ),
    (
        &["vitamin d", "vitamin b12", "b12"],
        "विटामिन D/B12 की कमी से थकान और हड्डियों की कमज़ोरी हो सकती है।",
    ),
    (
        &["tsh", "thyroid"],
        "थायरॉइड जाँच शरीर के हार्मोन संतुलन से जुड़ी है।",
    ),
];

/// Two fixed closing sentences, always appended to the summary.
pub const CLOSING_LINES: [&str; 2] = [
    "पूरी रिपोर्ट की व्याख्या के लिए डॉक्टर से सलाह ज़रूर लें।",
    "नियमित जाँच करवाते रहें और संतुलित आहार लें।",
];

/// Filler advisories used to pad short summaries up to five lines. The first
/// entry keeps the wording of the production template's default sentence.
pub const FILLER_LINES: [&str; 3] = [
    "रिपोर्ट सामान्य लग रही है। लेकिन कोई भी लक्षण हो तो डॉक्टर से सलाह लें।",
    "पर्याप्त पानी पिएँ और अच्छी नींद लें।",
    "रोज़ाना हल्की कसरत सेहत के लिए फ़ायदेमंद है।",
];

/// Fixed summary for the degraded path, used when OCR could not read enough
/// text from the image.
pub const DEGRADED_SUMMARY: [&str; 5] = [
    "रिपोर्ट की फोटो से टेक्स्ट साफ़ नहीं पढ़ा जा सका।",
    "कृपया अच्छी रोशनी में ली गई साफ़ और बड़ी फोटो दोबारा अपलोड करें।",
    "फोटो सीधी रखें और पूरी रिपोर्ट एक ही फ्रेम में लें।",
    "पूरी रिपोर्ट की व्याख्या के लिए डॉक्टर से सलाह ज़रूर लें।",
    "नियमित जाँच करवाते रहें और संतुलित आहार लें।",
];

/// Keys at most this long must match as whole words.
const SHORT_KEY_MAX_LEN: usize = 3;

/// Key containment test shared by both tables. Keys longer than three
/// characters match by plain substring containment (tolerates plurals and
/// suffixes); shorter keys like "hb", "alt", or "t3" must appear as a whole
/// word, not inside another token such as "HBsAg" or "fasting".
fn label_contains_key(label_lower: &str, key: &str) -> bool {
    if key.len() > SHORT_KEY_MAX_LEN {
        return label_lower.contains(key);
    }
    label_lower.match_indices(key).any(|(start, _)| {
        let before = label_lower[..start].chars().next_back();
        let after = label_lower[start + key.len()..].chars().next();
        before.map_or(true, |c| !c.is_alphanumeric())
            && after.map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Looks up the reference range for a lowercased label. First declared key
/// that matches the label wins.
pub fn find_range(label_lower: &str) -> Option<(&'static str, f64, f64)> {
    REFERENCE_RANGES
        .iter()
        .find(|(key, _, _)| label_contains_key(label_lower, key))
        .copied()
}

/// Whether the lowercased label matches any recognized test name.
pub fn is_known_test(label_lower: &str) -> bool {
    KNOWN_TESTS.iter().any(|test| label_contains_key(label_lower, test))
}
