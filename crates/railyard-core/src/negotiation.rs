//! Negotiation
//!
//! Routes player messages to trains and applies each train's reaction.

use bevy_ecs::prelude::*;
use rand::Rng;
use railyard_events::{ActionTag, ChatReply};

use crate::components::{
    ChatEntry, ChatHistory, ConversationMemory, Disposition, Persona, PromiseLedger, Roster,
    SessionState, TrainId, TrainName,
};
use crate::persuasion::{self, Decision, COUNTER_OFFERS, NEGOTIATION_LINE};
use crate::SimRng;

/// Extracts `@name` mentions, without the `@`, in message order.
///
/// A mention is `@` followed by one or more ASCII letters, digits or
/// underscores.
pub fn parse_mentions(text: &str) -> Vec<String> {
    let mut mentions = Vec::new();
    let mut rest = text;
    while let Some(at) = rest.find('@') {
        rest = &rest[at + 1..];
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end > 0 {
            mentions.push(rest[..end].to_string());
        }
        rest = &rest[end..];
    }
    mentions
}

/// True if a train name contains any of the mentions, ignoring case.
pub fn name_matches(name: &str, mentions: &[String]) -> bool {
    let name = name.to_uppercase();
    mentions
        .iter()
        .any(|m| name.contains(m.to_uppercase().as_str()))
}

/// The trains a message is addressed to, in roster order.
///
/// No mentions addresses every train. Mentions that match nobody address
/// nobody.
pub fn select_addressed(world: &World, text: &str) -> Vec<Entity> {
    let mentions = parse_mentions(text);
    let roster = world.resource::<Roster>();
    if mentions.is_empty() {
        return roster.iter().collect();
    }
    roster
        .iter()
        .filter(|&entity| {
            world
                .get::<TrainName>(entity)
                .is_some_and(|name| name_matches(&name.0, &mentions))
        })
        .collect()
}

/// Scores a message for one train and applies the outcome.
///
/// Compliance pauses the train. Negotiation and refusal leave its state
/// untouched. Every call is recorded in the train's chat history and
/// conversation memory. Returns `None` if `entity` is not a train.
pub fn respond_to_chat(world: &mut World, entity: Entity, text: &str) -> Option<ChatReply> {
    let turn = world.resource::<SessionState>().turn;

    let persona = *world.get::<Persona>(entity)?;
    let appetite = world.get::<Disposition>(entity)?.appetite;
    let trust = world
        .get::<PromiseLedger>(entity)
        .map_or(1.0, PromiseLedger::trust);

    let verdict = persuasion::evaluate(
        persona.framework,
        persona.beliefs.reflexive.negotiability,
        trust,
        appetite,
        text,
    );
    let profile = persuasion::profile(persona.framework);

    let (response, action) = match verdict.decision {
        Decision::Comply => {
            world.get_mut::<Disposition>(entity)?.comply();
            (profile.compliance, ActionTag::Paused)
        }
        Decision::Negotiate => {
            let mut rng = world.resource_mut::<SimRng>();
            let offer = COUNTER_OFFERS[rng.0.gen_range(0..COUNTER_OFFERS.len())];
            (NEGOTIATION_LINE, ActionTag::Counter(offer.to_string()))
        }
        Decision::Refuse => (profile.refusal, ActionTag::Refused),
    };

    if let Some(mut history) = world.get_mut::<ChatHistory>(entity) {
        history.push(ChatEntry {
            text: text.to_string(),
            score: verdict.score,
            action: action.clone(),
            turn,
        });
    }
    if let Some(mut memory) = world.get_mut::<ConversationMemory>(entity) {
        memory.add_exchange(text, response, turn, &verdict.categories);
    }

    let agent_id = world.get::<TrainId>(entity)?.0.clone();
    let agent_name = world.get::<TrainName>(entity)?.0.clone();
    tracing::debug!(
        "{} scored {:.2} on {:?}: {}",
        agent_name,
        verdict.score,
        text,
        action
    );

    Some(ChatReply {
        agent_id,
        agent_name,
        response_text: response.to_string(),
        action_tag: action,
        score: verdict.score,
        turn,
    })
}

/// Marks a broken promise against every addressed train. Returns how many
/// trains were affected.
pub fn report_broken_promise(world: &mut World, text: &str) -> usize {
    let addressed = select_addressed(world, text);
    let mut affected = 0;
    for entity in addressed {
        if let Some(mut ledger) = world.get_mut::<PromiseLedger>(entity) {
            ledger.record_broken();
            affected += 1;
            tracing::info!("Broken promise recorded, trust now {:.1}", ledger.trust());
        }
    }
    affected
}
