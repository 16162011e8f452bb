use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Fixed shape the object-extraction variant asks the model to fill in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageExtract {
    pub title: String,
    pub main_content: String,
    pub headings: Vec<String>,
    pub links: Vec<PageLink>,
    pub metadata: PageMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_summary: Option<String>,
    pub user_requested_info: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Ordered key/value pairs mirroring extraction order. Keys are not
/// deduplicated, this is a list, not a map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyValueExtract {
    pub extracted_data: Vec<KeyValuePair>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

/// Strict JSON schema for the object variant's model call. Optional fields
/// are nullable rather than omittable because strict mode requires every
/// property to be listed as required.
pub fn page_extract_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "extractedInfo": {
                "type": "object",
                "description": "The structured extracted information from the HTML content",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "The title of the webpage"
                    },
                    "mainContent": {
                        "type": "string",
                        "description": "The main content or summary of the webpage"
                    },
                    "headings": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "An array of important headings found on the page"
                    },
                    "links": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "text": { "type": "string" },
                                "url": { "type": "string" }
                            },
                            "required": ["text", "url"],
                            "additionalProperties": false
                        },
                        "description": "An array of important links found on the page"
                    },
                    "metadata": {
                        "type": "object",
                        "properties": {
                            "description": { "type": ["string", "null"] },
                            "keywords": {
                                "type": ["array", "null"],
                                "items": { "type": "string" }
                            },
                            "author": { "type": ["string", "null"] }
                        },
                        "required": ["description", "keywords", "author"],
                        "additionalProperties": false,
                        "description": "Metadata information about the webpage"
                    },
                    "pageSummary": {
                        "type": ["string", "null"],
                        "description": "A summary of the page"
                    },
                    "userRequestedInfo": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "An array of information specifically requested by the user"
                    }
                },
                "required": [
                    "title",
                    "mainContent",
                    "headings",
                    "links",
                    "metadata",
                    "pageSummary",
                    "userRequestedInfo"
                ],
                "additionalProperties": false
            }
        },
        "required": ["extractedInfo"],
        "additionalProperties": false
    })
}

/// Strict JSON schema for the key/value variant's model call.
pub fn key_value_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "extractedInfo": {
                "type": "object",
                "description": "The structured extracted information from the HTML content",
                "properties": {
                    "extractedData": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "key": { "type": "string" },
                                "value": { "type": "string" }
                            },
                            "required": ["key", "value"],
                            "additionalProperties": false
                        },
                        "description": "Extracted key-value pairs according to the user's request."
                    }
                },
                "required": ["extractedData"],
                "additionalProperties": false
            }
        },
        "required": ["extractedInfo"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_extract_serializes_with_camel_case_keys() {
        let extract = PageExtract {
            title: "Example".to_string(),
            main_content: "Example body".to_string(),
            headings: vec!["First heading".to_string()],
            links: vec![PageLink {
                text: "More".to_string(),
                url: "https://example.com/more".to_string(),
            }],
            metadata: PageMetadata {
                description: Some("An example page".to_string()),
                keywords: None,
                author: None,
            },
            page_summary: None,
            user_requested_info: vec!["Example".to_string()],
        };

        let value = serde_json::to_value(&extract).unwrap();
        assert_eq!(value["mainContent"], "Example body");
        assert_eq!(value["userRequestedInfo"][0], "Example");
        assert_eq!(value["metadata"]["description"], "An example page");
        // absent optionals are omitted, not serialized as null
        assert!(value.get("pageSummary").is_none());
        assert!(value["metadata"].get("keywords").is_none());
    }

    #[test]
    fn page_extract_accepts_null_optionals() {
        let raw = r#"{
            "title": "Example",
            "mainContent": "body",
            "headings": [],
            "links": [],
            "metadata": { "description": null, "keywords": null, "author": null },
            "pageSummary": null,
            "userRequestedInfo": []
        }"#;

        let extract: PageExtract = serde_json::from_str(raw).unwrap();
        assert_eq!(extract.title, "Example");
        assert_eq!(extract.page_summary, None);
        assert_eq!(extract.metadata.author, None);
    }

    #[test]
    fn page_extract_rejects_missing_required_field() {
        // no title
        let raw = r#"{
            "mainContent": "body",
            "headings": [],
            "links": [],
            "metadata": {},
            "userRequestedInfo": []
        }"#;

        assert!(serde_json::from_str::<PageExtract>(raw).is_err());
    }

    #[test]
    fn key_value_extract_preserves_order_and_duplicates() {
        let raw = r#"{
            "extractedData": [
                { "key": "price", "value": "$19.99" },
                { "key": "price", "value": "$24.99" },
                { "key": "currency", "value": "USD" }
            ]
        }"#;

        let extract: KeyValueExtract = serde_json::from_str(raw).unwrap();
        assert_eq!(extract.extracted_data.len(), 3);
        assert_eq!(extract.extracted_data[0].value, "$19.99");
        assert_eq!(extract.extracted_data[1].key, "price");
        assert_eq!(extract.extracted_data[2].key, "currency");
    }

    #[test]
    fn schemas_are_strict_objects() {
        for schema in [page_extract_schema(), key_value_schema()] {
            assert_eq!(schema["type"], "object");
            assert_eq!(schema["additionalProperties"], false);
            assert_eq!(schema["required"][0], "extractedInfo");
        }
    }
}
