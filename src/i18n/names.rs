/// Project name translation (Turkish -> English)
///
/// Project names are free text, so they are translated with an ordered table
/// of regex substitutions. Every rule runs, in order, on the output of the
/// previous one. Longer phrases come before the single words they contain.

use regex::Regex;

const RULES: &[(&str, &str)] = &[
    (r"(?i)\biş merkezi\b", "Business Center"),
    (r"(?i)\bkentsel dönüşüm\b", "Urban Renewal"),
    (r"(?i)\bdış cephe yenileme\b", "Facade Renovation"),
    (r"(?i)\bbeton santrali\b", "Concrete Plant"),
    (r"(?i)\baltyapı çalışmaları\b", "Infrastructure Works"),
    (r"(?i)\bvilla projesi\b", "Villa Project"),
    (r"(?i)\bvillaları\b", "Villas"),
    (r"(?i)\bokul tadilatı\b", "School Renovation"),
    (r"(?i)\btadilatı?\b", "Renovation"),
    (r"(?i)\brezidans\b", "Residence"),
    (r"(?i)\bkonut\b", "Residence"),
    (r"(?i)\bprojesi\b", "Project"),
    (r"(?i)\bevleri\b", "Houses"),
];

#[derive(Debug, Clone)]
pub struct NameTranslator {
    rules: Vec<(Regex, &'static str)>,
}

impl Default for NameTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameTranslator {
    pub fn new() -> Self {
        let rules = RULES
            .iter()
            .filter_map(|(pattern, replacement)| match Regex::new(pattern) {
                Ok(regex) => Some((regex, *replacement)),
                Err(e) => {
                    tracing::warn!("Skipping name rule {}: {}", pattern, e);
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Apply every rule in order
    pub fn translate(&self, name: &str) -> String {
        self.rules
            .iter()
            .fold(name.to_string(), |current, (regex, replacement)| {
                regex.replace_all(&current, *replacement).into_owned()
            })
    }
}
