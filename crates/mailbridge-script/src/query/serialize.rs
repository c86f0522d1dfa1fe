//! Script serialization helpers.

use super::{ACCOUNT_NOT_FOUND, DEFAULT_SCAN_MAILBOX, MAILBOX_NOT_FOUND};

/// Escapes text for embedding inside an AppleScript string literal.
///
/// Backslashes are doubled first, then double quotes are escaped. This keeps
/// the generated script syntactically intact; it is not a sanitizer.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Writes a quoted string literal.
fn literal(s: &str) -> String {
    format!("\"{}\"", escape(s))
}

/// Writes separator properties and the text helpers every row script uses.
///
/// `txt` turns a value into text with every separator character replaced
/// by a space, so a column can never spill into its neighbours. `raw` only
/// maps `missing value` to empty text and is reserved for the body, the one
/// column recovered as a remainder.
pub fn write_handlers(out: &mut String) {
    out.push_str("property RS : character id 30\n");
    out.push_str("property US : character id 31\n");
    out.push_str("property GS : character id 29\n");
    out.push_str("property FS : character id 28\n");
    out.push('\n');
    out.push_str("on joinList(theList, sep)\n");
    out.push_str("\tset savedDelimiters to AppleScript's text item delimiters\n");
    out.push_str("\tset AppleScript's text item delimiters to sep\n");
    out.push_str("\tset joined to theList as text\n");
    out.push_str("\tset AppleScript's text item delimiters to savedDelimiters\n");
    out.push_str("\treturn joined\n");
    out.push_str("end joinList\n");
    out.push('\n');
    out.push_str("on txt(value)\n");
    out.push_str("\tset s to my raw(value)\n");
    out.push_str("\trepeat with sep in {RS, US, GS, FS}\n");
    out.push_str("\t\tif s contains (contents of sep) then\n");
    out.push_str("\t\t\tset savedDelimiters to AppleScript's text item delimiters\n");
    out.push_str("\t\t\tset AppleScript's text item delimiters to (contents of sep)\n");
    out.push_str("\t\t\tset parts to text items of s\n");
    out.push_str("\t\t\tset AppleScript's text item delimiters to \" \"\n");
    out.push_str("\t\t\tset s to parts as text\n");
    out.push_str("\t\t\tset AppleScript's text item delimiters to savedDelimiters\n");
    out.push_str("\t\tend if\n");
    out.push_str("\tend repeat\n");
    out.push_str("\treturn s\n");
    out.push_str("end txt\n");
    out.push('\n');
    out.push_str("on raw(value)\n");
    out.push_str("\tif value is missing value then return \"\"\n");
    out.push_str("\treturn value as text\n");
    out.push_str("end raw\n");
    out.push('\n');
}

/// Writes the handler emitting one header row.
///
/// Column order: id, message id, sender, date sent, date received, read,
/// flagged, attachment count, mailbox, account, subject.
pub fn write_header_handler(out: &mut String) {
    out.push_str("on headerRow(msg, mbName, accName)\n");
    out.push_str("\ttell application \"Mail\"\n");
    out.push_str(
        "\t\tset fields to {my txt(id of msg), my txt(message id of msg), my txt(sender of msg), \
         my txt(date sent of msg), my txt(date received of msg), my txt(read status of msg), \
         my txt(flagged status of msg), my txt(count of mail attachments of msg), mbName, accName, \
         my txt(subject of msg)}\n",
    );
    out.push_str("\tend tell\n");
    out.push_str("\treturn my joinList(fields, US)\n");
    out.push_str("end headerRow\n");
    out.push('\n');
}

/// Writes the handler emitting one mailbox row.
///
/// Column order: name, account, unread count, message count, parent name.
/// The parent column is empty when the container is not a mailbox.
pub fn write_mailbox_handler(out: &mut String) {
    out.push_str("on mailboxRow(mb, accName)\n");
    out.push_str("\ttell application \"Mail\"\n");
    out.push_str("\t\tset parentName to \"\"\n");
    out.push_str("\t\ttry\n");
    out.push_str("\t\t\tset parentBox to container of mb\n");
    out.push_str("\t\t\tif class of parentBox is mailbox then set parentName to my txt(name of parentBox)\n");
    out.push_str("\t\tend try\n");
    out.push_str(
        "\t\tset fields to {my txt(name of mb), accName, my txt(unread count of mb), \
         my txt(count of messages of mb), parentName}\n",
    );
    out.push_str("\tend tell\n");
    out.push_str("\treturn my joinList(fields, US)\n");
    out.push_str("end mailboxRow\n");
    out.push('\n');
}

/// Sets `targetAccounts` to the named account or every account.
pub fn write_account_scope(out: &mut String, account: Option<&str>) {
    match account {
        Some(name) => {
            let acc = literal(name);
            let missing = literal(&format!("Account not found: {name}"));
            out.push_str(&format!(
                "\tif not (exists account {acc}) then error {missing} number {ACCOUNT_NOT_FOUND}\n"
            ));
            out.push_str(&format!("\tset targetAccounts to {{account {acc}}}\n"));
        }
        None => out.push_str("\tset targetAccounts to every account\n"),
    }
}

/// Resolves `targetMailbox`, `mbName` and `accName`.
///
/// Without an account, the first account holding a mailbox of that name
/// wins.
pub fn write_mailbox_lookup(out: &mut String, mailbox: &str, account: Option<&str>) {
    let mb = literal(mailbox);
    let missing = literal(&format!("Mailbox not found: {mailbox}"));
    match account {
        Some(name) => {
            let acc = literal(name);
            let missing_account = literal(&format!("Account not found: {name}"));
            out.push_str(&format!(
                "\tif not (exists account {acc}) then error {missing_account} number {ACCOUNT_NOT_FOUND}\n"
            ));
            out.push_str(&format!(
                "\tif not (exists mailbox {mb} of account {acc}) then error {missing} number {MAILBOX_NOT_FOUND}\n"
            ));
            out.push_str(&format!("\tset targetMailbox to mailbox {mb} of account {acc}\n"));
        }
        None => {
            out.push_str("\tset targetMailbox to missing value\n");
            out.push_str("\trepeat with acc in every account\n");
            out.push_str(&format!("\t\tif exists mailbox {mb} of acc then\n"));
            out.push_str(&format!("\t\t\tset targetMailbox to mailbox {mb} of acc\n"));
            out.push_str("\t\t\texit repeat\n");
            out.push_str("\t\tend if\n");
            out.push_str("\tend repeat\n");
            out.push_str(&format!(
                "\tif targetMailbox is missing value then error {missing} number {MAILBOX_NOT_FOUND}\n"
            ));
        }
    }
    out.push_str("\tset mbName to my txt(name of targetMailbox)\n");
    out.push_str("\tset accName to my txt(name of account of targetMailbox)\n");
}

/// Writes a bounded scan of one mailbox per account with a `whose` filter.
///
/// A named mailbox that exists in none of the scanned accounts raises
/// mailbox-not-found; the default inbox is skipped silently where missing.
pub fn write_scan(
    out: &mut String,
    account: Option<&str>,
    mailbox: Option<&str>,
    filter: &str,
    limit: u32,
) {
    let mb = literal(mailbox.unwrap_or(DEFAULT_SCAN_MAILBOX));

    write_handlers(out);
    write_header_handler(out);
    out.push_str("set rows to {}\n");
    out.push_str("set matched to false\n");
    out.push_str("tell application \"Mail\"\n");
    write_account_scope(out, account);
    out.push_str("\trepeat with acc in targetAccounts\n");
    out.push_str(&format!("\t\tif exists mailbox {mb} of acc then\n"));
    out.push_str("\t\t\tset matched to true\n");
    out.push_str(&format!("\t\t\tset targetMailbox to mailbox {mb} of acc\n"));
    out.push_str("\t\t\tset mbName to my txt(name of targetMailbox)\n");
    out.push_str("\t\t\tset accName to my txt(name of acc)\n");
    out.push_str(&format!(
        "\t\t\trepeat with msg in (messages of targetMailbox whose {filter})\n"
    ));
    out.push_str("\t\t\t\tset end of rows to my headerRow(msg, mbName, accName)\n");
    out.push_str(&format!("\t\t\t\tif (count of rows) >= {limit} then exit repeat\n"));
    out.push_str("\t\t\tend repeat\n");
    out.push_str("\t\tend if\n");
    out.push_str(&format!("\t\tif (count of rows) >= {limit} then exit repeat\n"));
    out.push_str("\tend repeat\n");
    if let Some(name) = mailbox {
        let missing = literal(&format!("Mailbox not found: {name}"));
        out.push_str(&format!(
            "\tif not matched then error {missing} number {MAILBOX_NOT_FOUND}\n"
        ));
    }
    out.push_str("end tell\n");
    out.push_str("return my joinList(rows, RS)\n");
}
