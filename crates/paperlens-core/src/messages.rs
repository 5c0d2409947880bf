//! User-facing strings. The audience reads Arabic, so these are not translated.

/// Inline notice for a file whose declared type is not PDF.
pub const NOT_A_PDF: &str = "يرجى اختيار ملف بصيغة PDF فقط";

/// Error state message when the PDF could not be read.
pub const EXTRACTION_FAILED: &str =
    "تعذر استخراج النص من ملف PDF. تأكد من أن الملف سليم وغير محمي بكلمة مرور.";

/// Error state message when the service reply is not valid JSON.
pub const PROCESSING_ERROR: &str = "حدث خطأ أثناء معالجة البيانات من الذكاء الاصطناعي.";

/// Error state message when no API key is configured.
pub const MISSING_API_KEY: &str =
    "لم يتم ضبط مفتاح الواجهة البرمجية. يرجى تعيين المتغير API_KEY أو VITE_API_KEY.";

/// Error state message when a failure carries no message of its own.
pub const UNEXPECTED_ERROR: &str = "حدث خطأ غير متوقع";

pub const STATUS_EXTRACTING: &str = "جاري استخراج النص من الملف...";
pub const STATUS_ANALYZING: &str = "جاري تحليل البحث بالذكاء الاصطناعي...";

/// Section titles, in display order.
pub const TITLE_OBJECTIVES: &str = "أهداف البحث";
pub const TITLE_METHODOLOGY: &str = "المنهجية المستخدمة";
pub const TITLE_TOOLS: &str = "الأدوات المستخدمة";
pub const TITLE_SAMPLE: &str = "العينة والمجتمع";
pub const TITLE_RESULTS: &str = "أبرز النتائج";
pub const TITLE_RECOMMENDATIONS: &str = "التوصيات المقترحة";
