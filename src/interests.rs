use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of interest categories used to bucket users and groups.
/// Slugs match the seeded group catalog, so they never change casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestTag {
    Teknologi,
    Bisnis,
    Seni,
    Sosial,
    Akademik,
    Olahraga,
    Leadership,
    Lingkungan,
}

pub const ALL_TAGS: [InterestTag; 8] = [
    InterestTag::Teknologi,
    InterestTag::Bisnis,
    InterestTag::Seni,
    InterestTag::Sosial,
    InterestTag::Akademik,
    InterestTag::Olahraga,
    InterestTag::Leadership,
    InterestTag::Lingkungan,
];

impl InterestTag {
    pub fn as_str(&self) -> &'static str {
        use InterestTag::*;
        match self {
            Teknologi => "teknologi",
            Bisnis => "bisnis",
            Seni => "seni",
            Sosial => "sosial",
            Akademik => "akademik",
            Olahraga => "olahraga",
            Leadership => "leadership",
            Lingkungan => "lingkungan",
        }
    }

    pub fn label(&self) -> &'static str {
        use InterestTag::*;
        match self {
            Teknologi => "Teknologi & IT",
            Bisnis => "Bisnis & Entrepreneurship",
            Seni => "Seni & Kreatif",
            Sosial => "Sosial & Volunteering",
            Akademik => "Akademik & Penelitian",
            Olahraga => "Olahraga & Kesehatan",
            Leadership => "Leadership & Organisasi",
            Lingkungan => "Lingkungan & Sustainability",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        use InterestTag::*;
        match self {
            Teknologi => &["teknologi", "it", "programming", "coding", "software", "web", "ai", "machine learning", "data", "komputer", "developer"],
            Bisnis => &["bisnis", "business", "entrepreneur", "startup", "marketing", "manajemen", "wirausaha"],
            Seni => &["seni", "art", "design", "creative", "kreatif", "musik", "film", "fotografi", "gambar"],
            Sosial => &["sosial", "social", "volunteer", "komunitas", "charity", "kemanusiaan"],
            Akademik => &["akademik", "research", "penelitian", "science", "sains", "study", "belajar", "ilmu"],
            Olahraga => &["olahraga", "sport", "fitness", "kesehatan", "health", "futsal", "basket", "lari"],
            Leadership => &["leadership", "leader", "organisasi", "organization", "management", "pemimpin", "ketua"],
            Lingkungan => &["lingkungan", "environment", "sustainability", "eco", "green", "alam"],
        }
    }
}

impl fmt::Display for InterestTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a free-text interest description to the tags whose keyword list has
/// at least one case-insensitive substring match. A text matching nothing
/// falls back to {teknologi, akademik} so nobody lands in zero groups.
pub fn classify(minat: &str) -> Vec<InterestTag> {
    let minat = minat.to_lowercase();
    let detected: Vec<InterestTag> = ALL_TAGS
        .into_iter()
        .filter(|tag| tag.keywords().iter().any(|kw| minat.contains(kw)))
        .collect();

    if detected.is_empty() {
        vec![InterestTag::Teknologi, InterestTag::Akademik]
    } else {
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keywords_falls_back_to_default_pair() {
        assert_eq!(classify("xyzzy"), vec![InterestTag::Teknologi, InterestTag::Akademik]);
        assert_eq!(classify(""), vec![InterestTag::Teknologi, InterestTag::Akademik]);
    }

    #[test]
    fn single_keyword_yields_singleton() {
        assert_eq!(classify("suka futsal"), vec![InterestTag::Olahraga]);
        assert_eq!(classify("WIRAUSAHA muda"), vec![InterestTag::Bisnis]);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        // "it" matches inside other words too, by design of the source lists
        assert_eq!(classify("ITENAS"), vec![InterestTag::Teknologi]);
    }

    #[test]
    fn multiple_categories_detected_in_tag_order() {
        let tags = classify("coding dan musik, kadang volunteer");
        assert_eq!(
            tags,
            vec![InterestTag::Teknologi, InterestTag::Seni, InterestTag::Sosial]
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let a = classify("machine learning dan penelitian");
        let b = classify("machine learning dan penelitian");
        assert_eq!(a, b);
    }
}
