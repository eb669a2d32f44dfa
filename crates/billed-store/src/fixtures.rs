//! Fixture bills served by the mock store.

use billed_core::{Bill, BillStatus};

/// URL returned by the mock store for every uploaded receipt
pub const MOCK_FILE_URL: &str = "https://localhost:3456/images/test.jpg";
/// Key returned by the mock store for every uploaded receipt
pub const MOCK_FILE_KEY: &str = "1234";

#[allow(clippy::too_many_arguments)]
fn bill(
    id: &str,
    expense_type: &str,
    name: &str,
    amount: i64,
    date: &str,
    vat: &str,
    commentary: &str,
    file_name: &str,
    status: BillStatus,
    comment_admin: &str,
) -> Bill {
    Bill {
        id: Some(id.to_string()),
        email: "a@a".to_string(),
        expense_type: expense_type.to_string(),
        name: name.to_string(),
        amount: Some(amount),
        date: date.to_string(),
        vat: vat.to_string(),
        pct: 20,
        commentary: commentary.to_string(),
        file_url: Some(format!(
            "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/{}?alt=media",
            file_name
        )),
        file_name: Some(file_name.to_string()),
        status,
        comment_admin: Some(comment_admin.to_string()),
    }
}

/// The four bills of `a@a`, in store order (not sorted by date).
pub fn fixture_bills() -> Vec<Bill> {
    vec![
        bill(
            "47qAXb6fIm2zOKkLzMro",
            "Hôtel et logement",
            "encore",
            400,
            "2004-04-04",
            "80",
            "séminaire billed",
            "preview-facture-free-201801-pdf-1.jpg",
            BillStatus::Pending,
            "ok",
        ),
        bill(
            "BeKy5Mo4jkmdfPGYpTxZ",
            "Transports",
            "test1",
            100,
            "2001-01-01",
            "",
            "plop",
            "1592770761.jpeg",
            BillStatus::Refused,
            "en fait non",
        ),
        bill(
            "UIUZtnPQvnbFnB0ozvJh",
            "Services en ligne",
            "test3",
            300,
            "2003-03-03",
            "60",
            "",
            "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
            BillStatus::Accepted,
            "bon bah d'accord",
        ),
        bill(
            "qcCK3SzECmaZAGRrHjaC",
            "Restaurants et bars",
            "test2",
            200,
            "2002-02-02",
            "40",
            "test2",
            "preview-facture-free-201801-pdf-1.jpg",
            BillStatus::Refused,
            "pas la bonne facture",
        ),
    ]
}
