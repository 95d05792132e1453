//! Prompt construction for the Redpen document assistant.
//!
//! Everything here is a pure function over domain types: the (mode, style)
//! system-prompt table, the payload builder with its sampling policy, the
//! per-mode fallback instructions the relay substitutes for blank user
//! prompts, and the keyword heuristic that suggests a mode from free text.

pub mod detect;

pub use detect::detect_mode;

use redpen_core::text::truncate_chars;
use redpen_core::{Mode, RequestPayload, SamplingOptions, Settings};

/// Temperature for chat mode.
const CHAT_TEMPERATURE: f32 = 0.3;
/// Temperature for every transform mode.
const TRANSFORM_TEMPERATURE: f32 = 0.2;
/// Token budget for summaries.
const SUMMARIZE_MAX_TOKENS: u32 = 1000;
/// Token budget for everything else.
const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Resolve the system prompt for a mode and style flag.
///
/// Each mode has exactly two variants. The legal flag swaps the whole prompt
/// text for the stricter legal-domain wording — it does not parameterize it.
pub fn system_prompt(mode: Mode, legal_style: bool) -> &'static str {
    match (mode, legal_style) {
        (Mode::Chat, true) => {
            "Ты юридический ассистент. Отвечай на вопросы строго по тексту документа. \
             Если информации нет в предоставленном тексте — явно говори об этом. \
             Будь точен и конкретен в ответах."
        }
        (Mode::Chat, false) => {
            "Ты полезный ассистент. Отвечай на вопросы по тексту документа. \
             Если информации нет в предоставленном тексте — скажи об этом."
        }
        (Mode::Rewrite, true) => {
            "Переформулируй выделенный текст, сохраняя смысл и юридическую точность. \
             Используй деловой юридический русский язык. \
             Сохраняй все юридически значимые термины и формулировки."
        }
        (Mode::Rewrite, false) => {
            "Переформулируй выделенный текст, сохраняя смысл. \
             Адаптируй стиль согласно пожеланиям пользователя, если они указаны."
        }
        (Mode::Compress, true) => {
            "Сократи текст до 30-50% от оригинала, сохранив все ключевые юридически \
             значимые элементы: стороны, предмет, сроки, суммы, обязательства, \
             ответственность. Не теряй важные условия."
        }
        (Mode::Compress, false) => {
            "Сократи текст до 30-50% от оригинала, сохранив ключевую информацию \
             и основной смысл."
        }
        (Mode::Expand, true) => {
            "Расширь текст, добавив уточнения и типичные юридические формулировки. \
             Не меняй смысл, позиции сторон и существенные условия. \
             Добавь необходимые оговорки и уточнения."
        }
        (Mode::Expand, false) => {
            "Расширь текст, добавив детали и уточнения. \
             Сохрани основной смысл и тон документа."
        }
        (Mode::Summarize, true) => {
            "Сделай краткое структурированное резюме текста в формате списка. Выдели: \n\
             - Предмет документа/договора\n\
             - Стороны (если применимо)\n\
             - Ключевые условия\n\
             - Сроки и суммы\n\
             - Обязательства сторон\n\
             - Риски и важные оговорки\n\
             Если какой-то пункт не применим — пропусти его."
        }
        (Mode::Summarize, false) => {
            "Сделай краткое структурированное резюме текста. \
             Выдели ключевые пункты и основные идеи в формате списка."
        }
        (Mode::GenerateSection, true) => {
            "Сгенерируй текст раздела юридического документа по описанию пользователя. \
             Соблюдай стиль и структуру соседних разделов, если они переданы в контексте. \
             Используй стандартные юридические формулировки."
        }
        (Mode::GenerateSection, false) => {
            "Сгенерируй текст раздела документа по описанию пользователя. \
             Соблюдай стиль документа, если контекст предоставлен."
        }
    }
}

/// Assemble the request payload for a mode, context, and user prompt.
///
/// The context is truncated to the settings cap here even though the selector
/// already enforced it — the cap holds at both layers.
pub fn build_payload(
    mode: Mode,
    context: &str,
    user_prompt: &str,
    settings: &Settings,
) -> RequestPayload {
    RequestPayload {
        mode,
        system_prompt: system_prompt(mode, settings.legal_style).to_string(),
        context: truncate_chars(context, settings.max_context_chars).to_string(),
        user_prompt: user_prompt.to_string(),
        options: SamplingOptions {
            temperature: if mode == Mode::Chat {
                CHAT_TEMPERATURE
            } else {
                TRANSFORM_TEMPERATURE
            },
            max_tokens: if mode == Mode::Summarize {
                SUMMARIZE_MAX_TOKENS
            } else {
                DEFAULT_MAX_TOKENS
            },
        },
    }
}

/// The canned instruction substituted when the user prompt is blank.
///
/// Keyed by the wire mode string: the relay applies this after validation
/// without parsing the mode into the enum, so an unrecognized mode still gets
/// the generic instruction.
pub fn default_user_prompt(mode: &str) -> &'static str {
    match mode {
        "rewrite" => "Переформулируй текст",
        "compress" => "Сократи текст",
        "expand" => "Расширь текст",
        "summarize" => "Сделай резюме текста",
        "generate_section" => "Сгенерируй раздел",
        _ => "Обработай текст",
    }
}

/// Render the context annotation attached to a user message.
pub fn format_context_info(context: &str, is_selection: bool) -> String {
    let chars = context.chars().count();
    let source = if is_selection { "выделения" } else { "документа" };
    format!("Контекст: {chars} символов из {source}")
}
