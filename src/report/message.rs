//! Final patient-message formatting.

use crate::config::PipelineConfig;

use super::fields::ExtractedFields;

/// Merges identity fields and summary lines into the fixed bilingual message
/// template with the clinic signature block. Pure substitution; recomputed
/// per invocation and never stored.
pub fn compose(fields: &ExtractedFields, summary: &[String], cfg: &PipelineConfig) -> String {
    format!(
        "👤 नाम: {name}\n\
         🎂 उम्र: {age} साल\n\
         📱 संपर्क: {phone}\n\
         \n\
         📑 रिपोर्ट का सारांश:\n\
         {summary}\n\
         \n\
         🏥 {clinic}\n\
         📞 {clinic_phone}",
        name = fields.name,
        age = fields.age,
        phone = fields.phone,
        summary = summary.join("\n"),
        clinic = cfg.clinic_name,
        clinic_phone = cfg.clinic_phone,
    )
}
