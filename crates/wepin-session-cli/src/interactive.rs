/*
[INPUT]:  User input via terminal prompts
[OUTPUT]: Actions dispatched to the session manager
[POS]:    CLI interactive flow
[UPDATE]: When menu entries or prompts change
*/

use anyhow::Result;
use async_trait::async_trait;
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use wepin_session::{InputRequest, InputSource, Notice, SessionManager};

use crate::actions::{self, Action};
use crate::render::{print_notice, print_snapshot};

/// Answers input requests with a terminal prompt; an empty line cancels
pub struct DialoguerInput;

#[async_trait]
impl InputSource for DialoguerInput {
    async fn request_input(&self, request: InputRequest) -> Option<String> {
        let prompt = request.prompt.clone();
        let answer = tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
        })
        .await;

        match answer {
            Ok(Ok(text)) => Some(text),
            Ok(Err(err)) => {
                warn!(kind = ?request.kind, error = %err, "prompt failed");
                None
            }
            Err(err) => {
                warn!(error = %err, "prompt task failed");
                None
            }
        }
    }
}

pub fn drain_notices(notices: &mut UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        print_notice(&notice);
    }
}

pub async fn run_interactive(
    manager: &SessionManager,
    notices: &mut UnboundedReceiver<Notice>,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Wepin Session CLI").bold().cyan());
    let input = DialoguerInput;

    loop {
        let mut items: Vec<&str> = Action::ALL.iter().map(|action| action.label()).collect();
        items.push("Show session");
        items.push("Exit");

        let selection = Select::with_theme(&theme)
            .with_prompt(format!("Select action ({})", manager.status()))
            .items(&items)
            .default(0)
            .interact()?;

        match Action::ALL.get(selection) {
            Some(&action) => {
                let result = actions::execute(manager, action, &input).await;
                drain_notices(notices);
                if let Some(line) = actions::summary_line(action, &result) {
                    println!("{}", style(line).bold());
                }
            }
            None if selection == Action::ALL.len() => print_snapshot(&manager.snapshot()),
            None => return Ok(()),
        }
    }
}
