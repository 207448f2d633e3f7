use regex::Regex;
use std::sync::LazyLock;

use crate::media::{Kind, RegularFile, Variant};

/// `DSC_0001.JPG`, `MOV_0042_3.mp4`, ... Extension literals are case-sensitive.
static CAMERA_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<head>(?i:DSC|MOV))_(?P<idx>[0-9]{4})(?:_(?P<conv>[0-9]{1,3}))?\.(?:JPG|mp4)$")
        .unwrap()
});

/// Classify a bare filename. Never fails: anything outside the grammar is `Unusual`.
pub fn classify(filename: &str) -> Kind {
    let Some(caps) = CAMERA_NAME_RE.captures(filename) else {
        return Kind::Unusual;
    };

    let variant = match caps["head"].to_ascii_uppercase().as_str() {
        "DSC" => Variant::Picture,
        "MOV" => Variant::Video,
        _ => return Kind::Unusual,
    };
    // At most four ASCII digits, always fits
    let index = caps["idx"].parse().unwrap_or(0);
    let convolution = caps
        .name("conv")
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    Kind::Regular(RegularFile::new(variant, index, convolution))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular(filename: &str) -> RegularFile {
        match classify(filename) {
            Kind::Regular(r) => r,
            Kind::Unusual => panic!("{filename} should be classified"),
        }
    }

    #[test]
    fn test_camera_names() {
        assert_eq!(regular("DSC_0001.JPG"), RegularFile::new(Variant::Picture, 1, 0));
        assert_eq!(regular("DSC_0120_7.JPG"), RegularFile::new(Variant::Picture, 120, 7));
        assert_eq!(regular("MOV_9999.mp4"), RegularFile::new(Variant::Video, 9999, 0));
        assert_eq!(regular("MOV_0003_123.mp4"), RegularFile::new(Variant::Video, 3, 123));
    }

    #[test]
    fn test_head_is_case_insensitive() {
        assert_eq!(regular("dsc_0002.JPG").variant, Variant::Picture);
        assert_eq!(regular("Mov_0002.mp4").variant, Variant::Video);
    }

    #[test]
    fn test_extension_is_not_tied_to_head() {
        // The variant fixes its own target extension
        assert_eq!(regular("MOV_0004.JPG").variant, Variant::Video);
        assert_eq!(regular("DSC_0004.mp4").variant, Variant::Picture);
    }

    #[test]
    fn test_unusual_names() {
        for name in [
            "",
            "random.txt",
            "DSC_0001.jpg",
            "MOV_0001.MP4",
            "DSC_001.JPG",
            "DSC_00001.JPG",
            "DSC_0001_1234.JPG",
            "DSC_0001_.JPG",
            "IMG_0001.JPG",
            "xDSC_0001.JPG",
            "DSC_0001.JPG.bak",
            "DSC_٠١٢٣.JPG",
        ] {
            assert_eq!(classify(name), Kind::Unusual, "{name:?}");
        }
    }
}
