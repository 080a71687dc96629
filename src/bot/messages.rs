//! Fixed reply texts (Arabic).

pub const WELCOME: &str = "👋 مرحباً بك!\n\n\
أنا مساعدك الذكي المتاح 24/7 لخدمتك.\n\n\
يمكنني مساعدتك في:\n\
✅ الإجابة على استفساراتك\n\
✅ معلومات عن المنتجات\n\
✅ التحقق من المدفوعات\n\
✅ إرسال المنتجات الرقمية\n\n\
كيف يمكنني مساعدتك اليوم؟";

pub const HELP: &str = "📌 الأوامر المتاحة:\n\n\
/start - بدء محادثة جديدة\n\
/help - عرض المساعدة\n\
/price - عرض السعر\n\
/payment <المبلغ> - التحقق من الدفع وإرسال المنتج\n\n\
يمكنك أيضاً إرسال أي سؤال وسأجيب عليه تلقائياً!";

pub const INVALID_AMOUNT: &str = "⚠️ المبلغ المدخل غير صحيح. يرجى إدخال رقم صحيح.";

pub const VOICE_UNSUPPORTED: &str = "🎤 تم استلام رسالة صوتية.\n\n\
حالياً لا يمكنني معالجة الرسائل الصوتية، لكن يمكنك:\n\
✅ إرسال رسالة نصية\n\
✅ استخدام الأوامر المتاحة (/help)";

pub const VIDEO_UNSUPPORTED: &str = "📹 تم استلام رسالة فيديو.\n\n\
يمكنني مساعدتك عبر الرسائل النصية.\n\
اكتب سؤالك وسأجيب عليه فوراً!";

pub const CONTACT_RECEIVED: &str = "📞 شكراً لمشاركة معلومات الاتصال.\n\n\
للتواصل الفوري، يمكنك استخدام الدردشة النصية.\n\
أنا متاح 24/7 للرد على استفساراتك!";

/// Sent when answering a free-text message fails.
pub const TEXT_FAILURE: &str = "عذراً، حدث خطأ. يرجى المحاولة مرة أخرى.";

/// Sent when any other handler fails.
pub const UNEXPECTED_ERROR: &str = "عذراً، حدث خطأ غير متوقع. يرجى المحاولة مرة أخرى.";

pub fn system_prompt(price: f64) -> String {
    format!(
        "أنت مساعد ذكي لخدمة العملاء عبر تليجرام. مهمتك:\n\
1. الرد على استفسارات العملاء بطريقة احترافية ومهذبة\n\
2. تقديم معلومات عن المنتجات الرقمية\n\
3. مساعدة العملاء في عملية الشراء\n\
4. الإجابة على الأسئلة المتعلقة بالدفع والتوصيل\n\
5. السعر المطلوب هو {} وحدة نقدية\n\n\
كن ودودًا ومحترفًا في جميع تعاملاتك.",
        price
    )
}

pub fn price(price: f64) -> String {
    format!(
        "💰 سعر المنتج الرقمي: {} وحدة نقدية\n\n\
للشراء، قم بإرسال الأمر:\n\
/payment <المبلغ>",
        price
    )
}

pub fn payment_usage(price: f64) -> String {
    format!("⚠️ يرجى تحديد المبلغ المدفوع:\nمثال: /payment {}", price)
}

pub fn payment_verified(amount: f64, price: f64) -> String {
    format!(
        "✅ تم التحقق من المبلغ: {} وحدة نقدية\n\
المبلغ المطلوب: {} وحدة نقدية\n\n\
جاري إرسال المنتج الرقمي...",
        amount, price
    )
}

pub fn payment_insufficient(amount: f64, price: f64, shortfall: &str) -> String {
    format!(
        "❌ المبلغ المدفوع ({}) أقل من السعر المطلوب ({})\n\n\
الفرق: {} وحدة نقدية\n\n\
يرجى إكمال الدفع للحصول على المنتج.",
        amount, price, shortfall
    )
}

pub fn product_delivery(url: &str) -> String {
    format!(
        "✅ تم التحقق من الدفع بنجاح!\n\n\
🎁 رابط تحميل المنتج الرقمي:\n{}\n\n\
شكراً لك على الشراء!",
        url
    )
}
