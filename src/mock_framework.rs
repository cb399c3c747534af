//! # Mock Framework
//!
//! Utilities for testing code that talks to the roster service without running it.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its mailbox.
//! Then use helpers like [`expect_get`] or [`expect_save`] to assert what was sent
//! and to answer it.

use tokio::sync::{mpsc, oneshot};

use crate::clients::RosterClient;
use crate::domain::{Employee, EmployeeQuery};
use crate::error::RosterError;
use crate::messages::RosterRequest;

type Responder<T> = oneshot::Sender<Result<T, RosterError>>;

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client(buffer_size: usize) -> (RosterClient, mpsc::Receiver<RosterRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RosterClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetEmployee request
pub async fn expect_get(receiver: &mut mpsc::Receiver<RosterRequest>) -> Option<(u32, Responder<Option<Employee>>)> {
    match receiver.recv().await {
        Some(RosterRequest::GetEmployee { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a ListEmployees request
pub async fn expect_list(receiver: &mut mpsc::Receiver<RosterRequest>) -> Option<(EmployeeQuery, Responder<Vec<Employee>>)> {
    match receiver.recv().await {
        Some(RosterRequest::ListEmployees { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save(receiver: &mut mpsc::Receiver<RosterRequest>) -> Option<Responder<()>> {
    match receiver.recv().await {
        Some(RosterRequest::Save { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::domain::sample;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let get_task = tokio::spawn(async move { client.get_employee(5).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 5);
        let employee = Employee::from_create(5, sample("Anna", "Lee", "Sales", 1.0));
        responder.send(Ok(Some(employee))).unwrap();

        let result = get_task.await.unwrap().unwrap();
        assert_eq!(result.map(|e| e.id()), Some(5));
    }

    #[tokio::test]
    async fn test_console_search_sends_name_query() {
        let (client, mut receiver) = create_mock_client(10);

        let console_task = tokio::spawn(async move {
            let mut console = Console::new(client, &b"6\n1\nfox\n"[..], Vec::new());
            console.run().await.map(|_| console.into_output())
        });

        let (query, responder) = expect_list(&mut receiver).await.expect("Expected List request");
        assert_eq!(query, EmployeeQuery::Name("fox".to_string()));
        responder.send(Ok(Vec::new())).unwrap();

        // Input runs out after the search, which triggers the exit save.
        let responder = expect_save(&mut receiver).await.expect("Expected Save request");
        responder.send(Ok(())).unwrap();

        let output = String::from_utf8(console_task.await.unwrap().unwrap()).unwrap();
        assert!(output.contains("No employees found."));
        assert!(output.contains("Thank you for using Employee Management System!"));
    }

    #[tokio::test]
    async fn test_console_reports_save_failure() {
        let (client, mut receiver) = create_mock_client(10);

        let console_task = tokio::spawn(async move {
            let mut console = Console::new(client, &b"9\n"[..], Vec::new());
            console.run().await.map(|_| console.into_output())
        });

        let responder = expect_save(&mut receiver).await.expect("Expected Save request");
        let disk_full = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        responder.send(Err(RosterError::Io(disk_full))).unwrap();

        let output = String::from_utf8(console_task.await.unwrap().unwrap()).unwrap();
        assert!(output.contains("Error saving employee data: I/O error: disk full"));
    }
}
