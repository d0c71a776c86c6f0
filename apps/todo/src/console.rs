//! Interactive operator console
//!
//! A numbered menu over stdin/stdout that talks to the RPC endpoint through
//! the same client contract as any external caller. RPC failures are printed
//! and the menu continues; only cancellation, `4` or end of input stop it.

use std::io;

use domain_tasks::conversions::response_to_tasks;
use rpc::todo::todo_service_client::TodoServiceClient;
use rpc::todo::{AddTaskRequest, CompleteTaskRequest, GetTasksRequest};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;
use tracing::debug;

const MENU: &str = "\nAvailable commands:\n\
[1] Add a Task\n\
[2] Get all Tasks\n\
[3] Complete a Task\n\
[4] Exit\n\
\nChoose a command number: ";

/// Why the console loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    /// Operator chose `4`
    Requested,
    /// Shutdown token fired
    Cancelled,
    /// Input stream closed
    EndOfInput,
}

pub struct InteractiveClient<R, W> {
    client: TodoServiceClient<Channel>,
    input: R,
    output: W,
    shutdown: CancellationToken,
}

impl<R, W> InteractiveClient<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(client: TodoServiceClient<Channel>, input: R, output: W, shutdown: CancellationToken) -> Self {
        Self {
            client,
            input,
            output,
            shutdown,
        }
    }

    /// Run the menu loop.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub async fn run(mut self) -> io::Result<ConsoleExit> {
        let exit = loop {
            if self.shutdown.is_cancelled() {
                break ConsoleExit::Cancelled;
            }

            self.write(MENU).await?;
            let choice = match self.read_line().await? {
                Ok(line) => line,
                Err(exit) => break exit,
            };

            let outcome = match choice.as_str() {
                "1" => self.add_task().await?,
                "2" => {
                    self.get_tasks().await?;
                    Ok(())
                }
                "3" => self.complete_task().await?,
                "4" => break ConsoleExit::Requested,
                _ => {
                    self.write("Invalid choice, please enter a valid command number.\n")
                        .await?;
                    Ok(())
                }
            };

            if let Err(exit) = outcome {
                break exit;
            }
        };

        self.write("Exiting interactive client...\n").await?;
        debug!(?exit, "Interactive client stopped");
        Ok(exit)
    }

    async fn add_task(&mut self) -> io::Result<Result<(), ConsoleExit>> {
        self.write("\nEnter Task Title: ").await?;
        let title = match self.read_line().await? {
            Ok(line) => line,
            Err(exit) => return Ok(Err(exit)),
        };
        self.write("Enter Task Description: ").await?;
        let description = match self.read_line().await? {
            Ok(line) => line,
            Err(exit) => return Ok(Err(exit)),
        };

        let request = AddTaskRequest { title, description };
        match self.client.add_task(request).await {
            Ok(_) => self.write("Task added successfully!\n").await?,
            Err(status) => self.report(&status).await?,
        }
        Ok(Ok(()))
    }

    async fn get_tasks(&mut self) -> io::Result<()> {
        let response = match self.client.get_tasks(GetTasksRequest {}).await {
            Ok(response) => response.into_inner(),
            Err(status) => return self.report(&status).await,
        };

        let tasks = match response_to_tasks(response) {
            Ok(tasks) => tasks,
            Err(e) => return self.write(&format!("Error: {}\n", e)).await,
        };

        if tasks.is_empty() {
            return self.write("No tasks found.\n").await;
        }

        self.write("Tasks:\n").await?;
        for task in tasks {
            let line = format!(
                "ID: {}, Title: {}, Description: {}, Status: {}, Created: {}\n",
                task.id,
                task.title,
                task.description,
                task.status(),
                task.created_at.to_rfc3339()
            );
            self.write(&line).await?;
        }
        Ok(())
    }

    async fn complete_task(&mut self) -> io::Result<Result<(), ConsoleExit>> {
        self.write("\nEnter Task ID to Complete: ").await?;
        let raw = match self.read_line().await? {
            Ok(line) => line,
            Err(exit) => return Ok(Err(exit)),
        };

        let Ok(id) = raw.parse::<i32>() else {
            self.write(&format!("Error: '{}' is not a valid task id\n", raw)).await?;
            return Ok(Ok(()));
        };

        match self.client.complete_task(CompleteTaskRequest { id }).await {
            Ok(_) => self.write("Task completed successfully!\n").await?,
            Err(status) => self.report(&status).await?,
        }
        Ok(Ok(()))
    }

    /// Reads one trimmed line, or the reason no line is coming.
    async fn read_line(&mut self) -> io::Result<Result<String, ConsoleExit>> {
        let mut line = String::new();
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Ok(Err(ConsoleExit::Cancelled)),
            read = self.input.read_line(&mut line) => match read? {
                0 => Ok(Err(ConsoleExit::EndOfInput)),
                _ => Ok(Ok(line.trim().to_string())),
            },
        }
    }

    async fn report(&mut self, status: &tonic::Status) -> io::Result<()> {
        debug!(code = ?status.code(), "RPC failed");
        self.write(&format!("Error: {}\n", status.message())).await
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}
