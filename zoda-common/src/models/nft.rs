use serde::{Deserialize, Serialize};

/// One `trait_type`/`value` pair in ERC-721 metadata JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: String,
}

impl NftAttribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// ERC-721 style metadata document. Built once from the generation result
/// at mint time and never mutated after upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<NftAttribute>,
}

impl NftMetadata {
    /// Metadata for a generated fortune: the name carries the username and
    /// sign, the description is the fortune text itself, and the image is
    /// the pinned character's gateway URL.
    pub fn for_fortune(
        username: &str,
        sign_name: &str,
        birth_year: i32,
        fortune: &str,
        image_url: &str,
    ) -> Self {
        Self {
            name: format!("{}'s {} Fortune", username, sign_name),
            description: fortune.to_string(),
            image: image_url.to_string(),
            attributes: vec![
                NftAttribute::new("Zodiac Sign", sign_name),
                NftAttribute::new("Year", birth_year.to_string()),
                NftAttribute::new("Username", username),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fortune_metadata_shape() {
        let m = NftMetadata::for_fortune(
            "Alice",
            "Horse",
            1990,
            "Great gains gallop your way.",
            "https://gateway.pinata.cloud/ipfs/bafyabc",
        );
        assert_eq!(m.name, "Alice's Horse Fortune");
        assert_eq!(m.description, "Great gains gallop your way.");
        assert_eq!(m.attributes.len(), 3);
        assert_eq!(m.attributes[0], NftAttribute::new("Zodiac Sign", "Horse"));
        assert_eq!(m.attributes[1], NftAttribute::new("Year", "1990"));
        assert_eq!(m.attributes[2], NftAttribute::new("Username", "Alice"));
    }

    #[test]
    fn serializes_with_erc721_field_names() {
        let m = NftMetadata::for_fortune("Bob", "Rat", 1996, "f", "ipfs://img");
        let v = serde_json::to_value(&m).unwrap();
        assert!(v.get("attributes").is_some());
        assert_eq!(v["attributes"][0]["trait_type"], "Zodiac Sign");
        assert_eq!(v["attributes"][2]["value"], "Bob");
    }
}
