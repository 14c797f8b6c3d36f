//! User-facing texts. Everything the popup or a Slack user can read lives here.

pub const SERVER_RUNNING: &str = "動画より文字派！ API Server is running";

pub const INVALID_MODE: &str = "不正なモードが指定されました。";
pub const ENTER_TEXT: &str = "要約するテキストを入力してください。";
pub const ENTER_VIDEO_ID: &str = "動画IDを指定してください。";
pub const ENTER_API_KEY: &str = "OpenAI APIキーを入力してください。";
pub const CAPTIONS_UNAVAILABLE: &str =
    "字幕の取得に失敗しました。動画IDを確認するか、自由入力モードをお試しください。";

pub const API_KEY_INVALID: &str = "OpenAI APIキーが無効です。正しいAPIキーを入力してください。";
pub const QUOTA_EXCEEDED: &str =
    "OpenAI APIのクォータ制限に達しました。APIキーの利用制限を確認してください。";
pub const INSUFFICIENT_QUOTA: &str = "OpenAI APIの利用枠を超えました。請求情報を確認してください。";
pub const SUMMARIZE_FAILED: &str = "要約処理中にエラーが発生しました。";
pub const EMPTY_COMPLETION: &str = "要約を生成できませんでした。";

// Slack replies
pub const DUPLICATE_EVENT: &str = "duplicate event";
pub const NOT_TARGET_MENTION: &str = "not target mention";
pub const LINK_NOT_FOUND: &str = "YouTubeリンクが見つかりません";
pub const API_KEY_NOT_REGISTERED: &str =
    "APIキーが未登録です。まず `/setapikey` で登録してください";
pub const SLACK_CAPTIONS_UNAVAILABLE: &str = "字幕を取得できませんでした";
pub const SLACK_SUMMARIZE_FAILED: &str = "要約処理に失敗しました";
pub const EVENT_PROCESSED: &str = "イベント処理完了";

// Slash commands
pub const USER_ID_MISSING: &str = "ユーザーIDが取得できませんでした";
pub const API_KEY_REGISTERED: &str = "APIキーを登録しました";
pub const API_KEY_DELETED: &str = "APIキーを削除しました";
pub const SET_API_KEY_USAGE: &str = "使い方: `/setapikey sk-...`";
pub const UNKNOWN_COMMAND: &str = "不明なコマンドです";
pub const COMMAND_FAILED: &str = "コマンド処理に失敗しました";
