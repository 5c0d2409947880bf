//! Fixed instruction text and response schema sent with every analysis.

use serde_json::{Value, json};

/// Placeholder the service is told to use when the paper does not state a field.
pub const NOT_STATED: &str = "غير مذكور بوضوح";

pub const SYSTEM_INSTRUCTION: &str = "أنت مساعد بحث أكاديمي خبير. وظيفتك هي قراءة الأبحاث واستخراج الأهداف والمنهجية والأدوات والعينة والنتائج والتوصيات بدقة عالية وباللغة العربية الفصحى. يجب أن يكون الرد بتنسيق JSON حصراً.";

pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Wrap the (already truncated) paper text in the extraction instruction.
pub fn build_prompt(source_text: &str) -> String {
    format!(
        "حلل النص التالي المستخرج من ورقة بحثية أكاديمية واستخرج المعلومات المحددة بدقة باللغة العربية.\n\
         إذا لم تجد معلومة محددة، اكتب \"{}\".\n\n\
         النص:\n{}\n",
        NOT_STATED, source_text
    )
}

/// The six-field schema, all fields required.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "objectives": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "قائمة بأهداف الدراسة"
            },
            "methodology": {
                "type": "STRING",
                "description": "المنهجية العلمية المستخدمة في البحث"
            },
            "tools": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "الأدوات العلمية المستخدمة (مثل الاستبيانات، الاختبارات...)"
            },
            "sample": {
                "type": "STRING",
                "description": "وصف لعينة البحث ومجتمع الدراسة"
            },
            "results": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "قائمة بأهم نتائج البحث"
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "قائمة بالتوصيات المقترحة"
            }
        },
        "required": ["objectives", "methodology", "tools", "sample", "results", "recommendations"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_text_and_sentinel() {
        let prompt = build_prompt("Objective: X.");
        assert!(prompt.contains("Objective: X."));
        assert!(prompt.contains(NOT_STATED));
    }

    #[test]
    fn schema_requires_all_six_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            ["objectives", "methodology", "tools", "sample", "results", "recommendations"]
        );
        for field in required {
            assert!(schema["properties"][field]["description"].is_string());
        }
    }

    #[test]
    fn schema_types_lists_and_scalars() {
        let schema = response_schema();
        for field in ["objectives", "tools", "results", "recommendations"] {
            assert_eq!(schema["properties"][field]["type"], "ARRAY");
            assert_eq!(schema["properties"][field]["items"]["type"], "STRING");
        }
        for field in ["methodology", "sample"] {
            assert_eq!(schema["properties"][field]["type"], "STRING");
        }
    }
}
