//! Human input: the turn suspends on these calls until a value arrives.
//!
//! `HumanInput` is transport-agnostic. The orchestrator does not care
//! whether the answer comes from stdin, a GUI event loop or a test script.
//! `HumanChannel` is the stock implementation: each request travels over an
//! mpsc channel with a oneshot responder, and the turn awaits exactly one
//! reply per request.

use tokio::sync::{mpsc, oneshot};

use crate::board::{CellEffect, Standings};
use crate::cards::Card;
use crate::core::{Color, GameError};

/// Source of the human participant's decisions.
#[async_trait::async_trait]
pub trait HumanInput: Send {
    /// Index into `hand` of the card to play.
    async fn request_card(&mut self, hand: &[Card]) -> Result<usize, GameError>;

    /// A standings target for `effect`, also used for pointing.
    async fn request_target(&mut self, effect: CellEffect, standings: &Standings) -> Result<Color, GameError>;

    /// Two colors to swap.
    async fn request_swap_pair(&mut self, standings: &Standings) -> Result<(Color, Color), GameError>;
}

/// A pending question for the surrounding application.
#[derive(Debug)]
pub enum HumanRequest {
    Card {
        hand: Vec<Card>,
        reply: oneshot::Sender<usize>,
    },
    Target {
        effect: CellEffect,
        standings: Standings,
        reply: oneshot::Sender<Color>,
    },
    SwapPair {
        standings: Standings,
        reply: oneshot::Sender<(Color, Color)>,
    },
}

/// Core side of the channel hand-off.
#[derive(Debug)]
pub struct HumanChannel {
    tx: mpsc::Sender<HumanRequest>,
}

/// Application side: receives requests and answers them.
#[derive(Debug)]
pub struct HumanHandle {
    rx: mpsc::Receiver<HumanRequest>,
}

impl HumanChannel {
    /// Create a connected pair.
    #[must_use]
    pub fn new() -> (HumanChannel, HumanHandle) {
        // one request is ever outstanding
        let (tx, rx) = mpsc::channel(1);
        (HumanChannel { tx }, HumanHandle { rx })
    }

    async fn ask<T: Send>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> HumanRequest + Send,
    ) -> Result<T, GameError> {
        let (reply, answer) = oneshot::channel();
        self.tx.send(build(reply)).await.map_err(|_| GameError::InputClosed)?;
        answer.await.map_err(|_| GameError::InputClosed)
    }
}

#[async_trait::async_trait]
impl HumanInput for HumanChannel {
    async fn request_card(&mut self, hand: &[Card]) -> Result<usize, GameError> {
        let hand = hand.to_vec();
        self.ask(|reply| HumanRequest::Card { hand, reply }).await
    }

    async fn request_target(&mut self, effect: CellEffect, standings: &Standings) -> Result<Color, GameError> {
        let standings = standings.clone();
        self.ask(|reply| HumanRequest::Target {
            effect,
            standings,
            reply,
        })
        .await
    }

    async fn request_swap_pair(&mut self, standings: &Standings) -> Result<(Color, Color), GameError> {
        let standings = standings.clone();
        self.ask(|reply| HumanRequest::SwapPair { standings, reply }).await
    }
}

impl HumanHandle {
    /// Wait for the next request. `None` once the game side has gone away.
    pub async fn next_request(&mut self) -> Option<HumanRequest> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let (mut channel, mut handle) = HumanChannel::new();
        let responder = tokio::spawn(async move {
            while let Some(request) = handle.next_request().await {
                match request {
                    HumanRequest::Card { hand, reply } => {
                        let _ = reply.send(hand.len() - 1);
                    }
                    HumanRequest::Target { standings, reply, .. } => {
                        let _ = reply.send(standings.last());
                    }
                    HumanRequest::SwapPair { standings, reply } => {
                        let _ = reply.send((standings.first(), standings.last()));
                    }
                }
            }
        });

        let standings = Standings::default();
        let hand = [Card::Number(1), Card::Number(4)];
        assert_eq!(channel.request_card(&hand).await, Ok(1));
        assert_eq!(channel.request_target(CellEffect::Crush, &standings).await, Ok(Color::Purple));
        assert_eq!(
            channel.request_swap_pair(&standings).await,
            Ok((Color::Red, Color::Purple))
        );

        drop(channel);
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_handle_reports_input_closed() {
        let (mut channel, handle) = HumanChannel::new();
        drop(handle);
        assert_eq!(channel.request_card(&[Card::Number(3)]).await, Err(GameError::InputClosed));
    }

    #[tokio::test]
    async fn test_dropped_reply_reports_input_closed() {
        let (mut channel, mut handle) = HumanChannel::new();
        tokio::spawn(async move {
            // answer nothing
            let _ = handle.next_request().await;
        });
        assert_eq!(
            channel.request_swap_pair(&Standings::default()).await,
            Err(GameError::InputClosed)
        );
    }
}
