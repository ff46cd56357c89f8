use std::sync::Arc;

use chrono::Duration;
use topping_match::conversation::{BotReply, ConversationService, ExactMatchResolver};
use topping_match::error::AppError;
use topping_match::matching::{FixedPicker, QuestionBank};

use crate::cli::DemoArgs;
use crate::infra::InMemorySessionStore;

/// Walks one scripted conversation: the first option of every question, then
/// the requested allergy answer. Useful for booth rehearsals and smoke
/// checks without a front end.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { set, allergy } = args;

    let bank = Arc::new(QuestionBank::standard()?);
    let store = Arc::new(InMemorySessionStore::default());
    let service = Arc::new(ConversationService::new(
        bank.clone(),
        store,
        Arc::new(ExactMatchResolver),
        Arc::new(FixedPicker(set)),
        Duration::minutes(30),
    ));

    println!("Topping matching kiosk demo (set {})", set % bank.len());

    let opening = service.start().await?;
    for message in &opening.messages {
        println!("bot> {message}");
    }

    let mut view = opening.question;
    loop {
        println!("\nbot> [{}/{}] {}", view.step, view.total_steps, view.prompt);
        for option in &view.options {
            println!("       - {} ({})", option.label, option.value);
        }

        let answer = if view.step == view.total_steps {
            allergy.clone()
        } else {
            view.options[0].value.clone()
        };
        println!("you> {answer}");

        match service.reply(&opening.session_id, &answer).await? {
            BotReply::Question { question } | BotReply::Allergy { question } => view = question,
            BotReply::Clarification { message, question } => {
                println!("bot> {message}");
                view = question;
            }
            BotReply::Result {
                message,
                recommendation,
            } => {
                println!("\nbot> {message}");
                println!(
                    "\ntopping: {:?} | allergy adjusted: {} | votes: {}",
                    recommendation.topping,
                    recommendation.allergy_adjusted,
                    recommendation.votes.len()
                );
                break;
            }
        }
    }

    Ok(())
}
