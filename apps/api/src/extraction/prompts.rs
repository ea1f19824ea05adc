// Skill extraction prompt for the AI strategy.
// The inference-rule and certification sections are rendered from
// `extraction::vocabulary`, the same tables the rule-based engine applies.

use std::fmt::Write;

use crate::extraction::vocabulary::{
    RuleFamily, CERTIFICATION_RULES, INFERENCE_FAMILIES, LIMITED_EXPERIENCE_PHRASES,
};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

const PREAMBLE: &str = "\
あなたは履歴書やスキルシートから技術情報を抽出する専門家です。
与えられたテキストから以下の情報を正確に抽出し、指定されたJSON形式で返してください。";

const BASIC_INFO_SECTION: &str = "\
1. 基本情報
   - 正社員としての勤務経験があるか
   - 残業や過勤務の経験があるか";

const SKILL_SECTION: &str = "\
3. 技術スキル
   - プログラミング言語
   - フレームワーク・ライブラリ
   - データベース
   - インフラ・ミドルウェア
   - 開発ツール
   - クラウドサービス";

const GUIDELINES: &str = "\
抽出のガイドライン:
- 明確に記載されている情報のみを抽出する
- 類似の表現も考慮する（例：「フルタイム」→正社員、「時間外労働」→残業）
- 技術スキルは実際に使用経験があると読み取れるもののみを含める
- 資格は「AWS」のようなブランド名だけでは判定せず、資格名・認定・合格などの記載がある場合のみtrueにする
- 下記の推論ルールに従って関連技術を追加する（これ以外の推論は行わない）";

const OUTPUT_SCHEMA: &str = r#"必ず以下のJSON形式で応答してください:
{
  "basicInfo": {
    "isFullTime": boolean,
    "hasOvertime": boolean
  },
  "certifications": {
    "hasAWSCertified": boolean,
    "hasCCNA": boolean,
    "hasLPIC": boolean,
    "hasJavaGold": boolean,
    "hasOracleMaster": boolean,
    "hasFE": boolean,
    "hasAP": boolean,
    "hasDBSpecialist": boolean,
    "hasNWSpecialist": boolean,
    "hasSCSpecialist": boolean
  },
  "skills": {
    "languages": string[],
    "frameworks": string[],
    "databases": string[],
    "infrastructure": string[],
    "tools": string[],
    "cloud": string[]
  },
  "skillsWithExperience": {
    "languages": [{"name": "技術名", "years": 経験年数}],
    "frameworks": [{"name": "技術名", "years": 経験年数}],
    "databases": [{"name": "技術名", "years": 経験年数}],
    "infrastructure": [{"name": "技術名", "years": 経験年数}],
    "tools": [{"name": "技術名", "years": 経験年数}],
    "cloud": [{"name": "技術名", "years": 経験年数}]
  }
}"#;

const EXPERIENCE_RULES: &str = r#"経験年数の抽出ルール:
- 「○年」「○年間」「○年以上」などの表現から年数を抽出
- 「○ヶ月」の場合は年数に変換（12ヶ月 = 1年、小数第1位まで）
- 経験年数が明記されていない技術は、yearsを省略
- 「経験あり」「使用経験」など年数不明の場合はyearsを省略
- 推論で追加した技術は、本文に年数の記載がない限りyearsを省略

例:
- "Java（5年）" → {"name": "Java", "years": 5}
- "Python 3年以上" → {"name": "Python", "years": 3}
- "React（2年6ヶ月）" → {"name": "React", "years": 2.5}
- "MySQL使用経験あり" → {"name": "MySQL"}"#;

/// Full system instruction for the AI strategy.
pub fn render_system_prompt() -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "{PREAMBLE}\n\n抽出する情報:\n{BASIC_INFO_SECTION}\n");

    let _ = writeln!(prompt, "2. IT関連資格");
    for rule in CERTIFICATION_RULES {
        let _ = writeln!(prompt, "   - {}", rule.description);
    }
    let _ = writeln!(prompt, "\n{SKILL_SECTION}\n\n{GUIDELINES}\n");

    prompt.push_str(&render_inference_rules());
    let _ = writeln!(prompt, "\n{OUTPUT_SCHEMA}\n\n{EXPERIENCE_RULES}\n\n{JSON_ONLY_INSTRUCTION}");
    prompt
}

/// The inference-rule section, one line per rule, in evaluation order.
pub fn render_inference_rules() -> String {
    let mut section = String::from("技術スキルの抽出における推論ルール（記載順に1回だけ適用）:\n");
    for (index, family) in INFERENCE_FAMILIES.iter().enumerate() {
        let _ = writeln!(section, "\n{}. {}:", index + 1, family.label);
        render_family(&mut section, family);
    }

    let hedges = LIMITED_EXPERIENCE_PHRASES
        .iter()
        .map(|p| format!("「{p}」"))
        .collect::<Vec<_>>()
        .join("");
    let _ = writeln!(
        section,
        "\n推論の適用ルール:\n\
         - 明示的な記載を優先し、それに加えて関連技術を追加\n\
         - {hedges}などの限定的な表現がある技術は、その技術のみ抽出し関連技術は推論しない\n\
         - 同じカテゴリ内での重複は避ける（例：JavaScriptを複数回含めない）"
    );
    section
}

fn render_family(out: &mut String, family: &RuleFamily) {
    for rule in family.rules {
        let targets = rule
            .implies
            .iter()
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "   - {} → {}", rule.trigger, targets);
    }
}

/// User message wrapping the (already truncated) document text.
pub fn user_prompt(text: &str) -> String {
    format!("以下のテキストから技術情報を抽出してください:\n\n{text}")
}
