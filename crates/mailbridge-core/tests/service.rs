//! Integration tests for the mail service.
//!
//! These tests use a fake executor that returns canned delimited text, so
//! they run without the mail application or `osascript`.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use mailbridge_core::{BridgeEnvelope, BridgeError, MailAccess, MailService, Status};
use mailbridge_script::codec::{
    RECORD_SEPARATOR, encode_attachment, encode_list, encode_record, encode_records,
};
use mailbridge_script::{Script, ScriptError, ScriptExecutor};

/// Fake executor that replays canned results and records every script.
#[derive(Default)]
struct FakeExecutor {
    responses: RefCell<VecDeque<Result<String, ScriptError>>>,
    scripts: RefCell<Vec<Script>>,
}

impl FakeExecutor {
    fn new() -> Self {
        Self::default()
    }

    fn reply(self, output: impl Into<String>) -> Self {
        self.responses.borrow_mut().push_back(Ok(output.into()));
        self
    }

    fn fail(self, code: i32, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ScriptError::Failed {
                code,
                message: message.into(),
            }));
        self
    }

    fn fail_with(self, err: ScriptError) -> Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    fn names(&self) -> Vec<&'static str> {
        self.scripts.borrow().iter().map(Script::name).collect()
    }

    fn source(&self, index: usize) -> String {
        self.scripts.borrow()[index].source().to_string()
    }
}

impl ScriptExecutor for FakeExecutor {
    fn execute(&self, script: &Script) -> mailbridge_script::Result<String> {
        self.scripts.borrow_mut().push(script.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }

    fn describe(&self) -> String {
        "fake".into()
    }
}

fn header_row(id: u64, subject: &str) -> String {
    let id_text = id.to_string();
    let message_id = format!("<{id}@x.com>");
    encode_record(&[
        id_text.as_str(),
        message_id.as_str(),
        "Jane Doe <jane@x.com>",
        "sent",
        "received",
        "false",
        "false",
        "0",
        "INBOX",
        "Work",
        subject,
    ])
}

/// Rows for indexes `start..=end`, oldest first, as the store returns them.
fn range_payload(start: u64, end: u64) -> String {
    let rows: Vec<String> = (start..=end).map(|i| header_row(i, &format!("msg {i}"))).collect();
    format!("{}\n", encode_records(&rows))
}

#[test]
fn diagnostics_granted() {
    let fake = FakeExecutor::new().reply("3\n");
    let service = MailService::new(&fake);

    let report = service.diagnostics();
    assert_eq!(report.mail_access, MailAccess::Granted);
    assert_eq!(report.account_count, Some(3));
    assert!(report.message.is_none());
    assert_eq!(report.executor, "fake");
    assert_eq!(fake.names(), ["probe"]);
}

#[test]
fn diagnostics_denied_is_not_an_error() {
    let fake = FakeExecutor::new().fail(-1743, "Not authorized to send Apple events to Mail.");
    let report = MailService::new(&fake).diagnostics();
    assert_eq!(report.mail_access, MailAccess::Denied);
    assert!(report.account_count.is_none());
    assert!(report.message.unwrap().starts_with("Mail access denied"));
}

#[test]
fn diagnostics_timeout_is_error() {
    let fake = FakeExecutor::new().fail_with(ScriptError::Timeout(Duration::from_secs(5)));
    let report = MailService::new(&fake).diagnostics();
    assert_eq!(report.mail_access, MailAccess::Error);
    assert!(report.message.unwrap().contains("timed out"));
}

#[test]
fn list_accounts_decodes_rows() {
    let emails = encode_list(&["jane@work.com"]);
    let payload = encode_records(&[
        encode_record(&["Work", "Jane Doe", emails.as_str(), "imap", "true"]),
        encode_record(&["iCloud", "Jane Doe", "", "iCloud", "true"]),
    ]);
    let fake = FakeExecutor::new().reply(payload);

    let accounts = MailService::new(&fake).list_accounts().unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].id.get(), 1);
    assert_eq!(accounts[0].email_addresses, ["jane@work.com"]);
    assert_eq!(accounts[1].id.get(), 2);
}

#[test]
fn list_accounts_access_denied() {
    let fake = FakeExecutor::new().fail(-1743, "Not authorized");
    let err = MailService::new(&fake).list_accounts().unwrap_err();
    assert_eq!(err, BridgeError::MailAccessDenied);
}

#[test]
fn list_mailboxes_builds_tree() {
    let payload = encode_records(&[
        encode_record(&["INBOX", "Work", "2", "10", ""]),
        encode_record(&["Projects", "Work", "0", "3", ""]),
        encode_record(&["Alpha", "Work", "1", "1", "Projects"]),
        encode_record(&["Lost", "Work", "0", "0", "Nowhere"]),
    ]);
    let fake = FakeExecutor::new().reply(payload);

    let tree = MailService::new(&fake).list_mailboxes(Some("Work")).unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].full_name, "Work/INBOX");
    assert_eq!(tree[1].children.len(), 1);
    assert_eq!(tree[1].children[0].full_name, "Work/Projects/Alpha");
    assert!(fake.source(0).contains("account \"Work\""));
}

#[test]
fn list_mailboxes_blank_account_means_all() {
    let fake = FakeExecutor::new().reply("");
    let tree = MailService::new(&fake).list_mailboxes(Some("  ")).unwrap();
    assert!(tree.is_empty());
    assert!(fake.source(0).contains("set targetAccounts to every account"));
}

#[test]
fn unknown_account_is_named() {
    let fake = FakeExecutor::new().fail(10001, "Account not found: Nope");
    let err = MailService::new(&fake)
        .list_mailboxes(Some("Nope"))
        .unwrap_err();
    assert_eq!(err, BridgeError::AccountNotFound("Nope".into()));
}

#[test]
fn list_messages_first_page_is_newest_first() {
    let fake = FakeExecutor::new()
        .reply("120\n")
        .reply(range_payload(71, 120));

    let page = MailService::new(&fake)
        .list_messages("INBOX", None, 50, 0)
        .unwrap();
    assert_eq!(page.total, 120);
    assert_eq!(page.limit, 50);
    assert!(page.has_more);
    assert_eq!(page.messages.len(), 50);
    assert_eq!(page.messages[0].id, 120);
    assert_eq!(page.messages[49].id, 71);

    assert_eq!(fake.names(), ["message-count", "message-range"]);
    assert!(fake.source(1).contains("messages 71 thru 120 of targetMailbox"));
}

#[test]
fn list_messages_short_last_page() {
    let fake = FakeExecutor::new().reply("30").reply(range_payload(1, 5));

    let page = MailService::new(&fake)
        .list_messages("INBOX", Some("Work"), 50, 25)
        .unwrap();
    assert_eq!(page.messages.len(), 5);
    assert!(!page.has_more);
    assert_eq!(page.offset, 25);
    assert!(fake.source(1).contains("messages 1 thru 5 of targetMailbox"));
}

#[test]
fn list_messages_offset_past_end_skips_fetch() {
    let fake = FakeExecutor::new().reply("30");

    let page = MailService::new(&fake)
        .list_messages("INBOX", None, 10, 30)
        .unwrap();
    assert!(page.messages.is_empty());
    assert!(!page.has_more);
    assert_eq!(page.total, 30);
    assert_eq!(fake.names(), ["message-count"]);
}

#[test]
fn list_messages_empty_mailbox() {
    let fake = FakeExecutor::new().reply("0");
    let page = MailService::new(&fake)
        .list_messages("Drafts", None, 50, 0)
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.messages.is_empty());
    assert_eq!(fake.names(), ["message-count"]);
}

#[test]
fn list_messages_clamps_limit() {
    let fake = FakeExecutor::new().reply("1000").reply(range_payload(801, 1000));
    let page = MailService::new(&fake)
        .list_messages("INBOX", None, 500, 0)
        .unwrap();
    assert_eq!(page.limit, 200);
    assert_eq!(page.messages.len(), 200);
    assert!(page.has_more);
}

#[test]
fn list_messages_rejects_bad_parameters() {
    let fake = FakeExecutor::new();
    let service = MailService::new(&fake);
    assert!(matches!(
        service.list_messages(" ", None, 50, 0),
        Err(BridgeError::InvalidParameter(_))
    ));
    assert!(matches!(
        service.list_messages("INBOX", None, 0, 0),
        Err(BridgeError::InvalidParameter(_))
    ));
    assert!(fake.names().is_empty());
}

#[test]
fn list_messages_unknown_mailbox() {
    let fake = FakeExecutor::new().fail(10002, "Mailbox not found: Nope");
    let err = MailService::new(&fake)
        .list_messages("Nope", None, 50, 0)
        .unwrap_err();
    assert_eq!(err, BridgeError::MailboxNotFound("Nope".into()));
}

#[test]
fn get_message_keeps_body_verbatim() {
    let content = format!("Line one\n{RECORD_SEPARATOR}Line two");
    let attachments = encode_list(&[encode_attachment("a.pdf", "application/pdf", "512")]);
    let cc = encode_list(&["carol@x.com"]);
    let payload = encode_record(&[
        "42",
        "<42@x.com>",
        "bob@x.com",
        "sent",
        "received",
        "true",
        "true",
        "INBOX",
        "Work",
        "jane@x.com",
        cc.as_str(),
        attachments.as_str(),
        "Report",
        content.as_str(),
    ]);
    let fake = FakeExecutor::new().reply(format!("{payload}\n"));

    let detail = MailService::new(&fake)
        .get_message(42, "INBOX", Some("Work"))
        .unwrap();
    assert_eq!(detail.header.id, 42);
    assert_eq!(detail.header.sender_name, "bob@x.com");
    assert_eq!(detail.header.sender_email, "bob@x.com");
    assert_eq!(detail.to_recipients, ["jane@x.com"]);
    assert_eq!(detail.cc_recipients, ["carol@x.com"]);
    assert_eq!(detail.attachments[0].name, "a.pdf");
    assert!(detail.header.has_attachments);
    assert_eq!(detail.content, content);
    assert!(fake.source(0).contains("whose id is 42"));
}

#[test]
fn get_message_not_found() {
    let fake = FakeExecutor::new().fail(10003, "Message not found: 7");
    let err = MailService::new(&fake)
        .get_message(7, "INBOX", None)
        .unwrap_err();
    assert_eq!(err, BridgeError::MessageNotFound(7));
    assert_eq!(err.to_string(), "Message not found: 7");
}

#[test]
fn get_message_rejects_zero_id() {
    let fake = FakeExecutor::new();
    let err = MailService::new(&fake)
        .get_message(0, "INBOX", None)
        .unwrap_err();
    assert!(matches!(err, BridgeError::InvalidParameter(_)));
    assert!(fake.names().is_empty());
}

#[test]
fn list_unread_truncates_to_limit() {
    let fake = FakeExecutor::new().reply(range_payload(1, 5));
    let unread = MailService::new(&fake).list_unread(None, None, 3).unwrap();
    assert_eq!(unread.len(), 3);
    let src = fake.source(0);
    assert!(src.contains("read status is false"));
    assert!(src.contains("mailbox \"INBOX\""));
}

#[test]
fn list_unread_clamps_limit_in_script() {
    let fake = FakeExecutor::new().reply("");
    MailService::new(&fake)
        .list_unread(Some("Work"), Some("Receipts"), 1_000)
        .unwrap();
    let src = fake.source(0);
    assert!(src.contains("(count of rows) >= 200"));
    assert!(src.contains("mailbox \"Receipts\""));
}

#[test]
fn search_passes_escaped_text() {
    let fake = FakeExecutor::new().reply(range_payload(9, 9));
    let hits = MailService::new(&fake)
        .search("  \"invoice\" ", None, None, 10)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert!(fake.source(0).contains("subject contains \"  \\\"invoice\\\" \""));
}

#[test]
fn names_reach_the_script_verbatim() {
    let fake = FakeExecutor::new().reply("0");
    MailService::new(&fake)
        .list_messages(" Spaced ", Some(" Work"), 10, 0)
        .unwrap();
    let src = fake.source(0);
    assert!(src.contains("mailbox \" Spaced \""));
    assert!(src.contains("account \" Work\""));
}

#[test]
fn search_rejects_blank_query() {
    let fake = FakeExecutor::new();
    let err = MailService::new(&fake).search("   ", None, None, 10).unwrap_err();
    assert_eq!(err, BridgeError::InvalidParameter("query is required".into()));
}

#[test]
fn other_failures_keep_runtime_message() {
    let fake = FakeExecutor::new().fail(-600, "Application isn’t running.");
    let err = MailService::new(&fake).list_accounts().unwrap_err();
    assert_eq!(
        err,
        BridgeError::AutomationError("Application isn’t running.".into())
    );
}

#[test]
fn envelope_wraps_service_results() {
    let fake = FakeExecutor::new().reply("").fail(-1743, "denied");
    let service = MailService::new(&fake);

    let ok: BridgeEnvelope<_> = service.list_accounts().into();
    assert_eq!(ok.status(), Status::Ok);
    assert_eq!(ok.to_json(false).unwrap(), r#"{"status":"ok","data":[]}"#);

    let err: BridgeEnvelope<_> = service.list_accounts().into();
    assert_eq!(err.status(), Status::Error);
    let json: serde_json::Value = serde_json::from_str(&err.to_json(false).unwrap()).unwrap();
    assert_eq!(json["status"], "error");
    assert!(json["error"].as_str().unwrap().starts_with("Mail access denied"));
    assert!(json.get("data").is_none());
}
