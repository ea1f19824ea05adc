// Shared prompt fragments.
// Each feature that calls the LLM builds its own prompt alongside it; this
// file holds the cross-cutting pieces.

/// Closing instruction that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "\
重要: 有効なJSONオブジェクトのみを返してください。\
JSON以外のテキスト、説明文、マークダウンのコードブロックは含めないでください。\
該当する情報がない場合も、すべてのフィールドを含めてください（boolean は false、配列は空配列）。";
