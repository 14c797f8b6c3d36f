pub const SYSTEM_PROMPT: &str = "以下は動画の文字起こしです。出演者が本当に伝えたいことが伝わるように、内容をわかりやすくまとめてください\n\
- 単なる要約ではなく、構造的に整理し、伝えたい主張が明確になるようにしてください\n\
- ポイントごとに見出しをつけてください。見出しの冒頭に絵文字を付けて、見やすさを向上させてください\n\
- 最後に出演者の「一番伝えたかったメッセージ」を一文でまとめてください\n";

pub const MOCK_SUMMARY: &str = "
# 要約結果（モックモード）

## 主なポイント
- これはモックモードでの要約結果です
- 実際のOpenAI APIは呼び出されていません
- 開発・テスト時にAPIキーのクォータを消費しません

## 詳細
このモードでは、OpenAI APIを実際に呼び出す代わりに、あらかじめ用意された要約結果を返します。
これにより、APIキーのクォータ制限に達した場合でも、アプリケーションの機能をテストできます。

## 一番伝えたかったメッセージ
「モックモードを使用することで、開発効率を向上させつつ、APIコストを削減できます」
";

pub const MOCK_SHORT_SUMMARY: &str = "
# 短いテキストの要約（モックモード）

入力されたテキストが短すぎるため、十分な要約ができません。
より詳細なテキストを入力してください。
";

/// Inputs shorter than this get the short-text notice in mock mode.
pub const SHORT_TEXT_CHARS: usize = 100;

pub fn build_user_prompt(text: &str) -> String {
    format!(
        "以下が動画の文字起こし全文です。要約をお願いします：\n\n{}",
        text
    )
}

pub fn mock_summary(text: &str) -> &'static str {
    if text.chars().count() < SHORT_TEXT_CHARS {
        MOCK_SHORT_SUMMARY
    } else {
        MOCK_SUMMARY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_user_prompt() {
        let prompt = build_user_prompt("字幕テキスト");
        assert!(prompt.ends_with("\n\n字幕テキスト"));
    }

    #[test]
    fn test_mock_summary_by_length() {
        assert_eq!(mock_summary("short"), MOCK_SHORT_SUMMARY);
        assert_eq!(mock_summary(&"a".repeat(99)), MOCK_SHORT_SUMMARY);
        assert_eq!(mock_summary(&"a".repeat(100)), MOCK_SUMMARY);
        // counted in characters, not bytes
        assert_eq!(mock_summary(&"字".repeat(50)), MOCK_SHORT_SUMMARY);
    }

    #[test]
    fn test_system_prompt_asks_for_structure() {
        assert!(SYSTEM_PROMPT.contains("見出し"));
        assert!(SYSTEM_PROMPT.contains("絵文字"));
        assert!(SYSTEM_PROMPT.contains("一番伝えたかったメッセージ"));
    }
}
