//! Canned demo messages and scripted call transcripts.

use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    Safe,
    Suspicious,
    Fraud,
}

impl FromStr for DemoKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "safe" => Ok(DemoKind::Safe),
            "suspicious" => Ok(DemoKind::Suspicious),
            "fraud" => Ok(DemoKind::Fraud),
            other => anyhow::bail!("Unknown demo type '{other}' (use safe, suspicious or fraud)"),
        }
    }
}

pub fn demo_message(kind: DemoKind) -> &'static str {
    match kind {
        DemoKind::Safe => {
            "Hi! Just wanted to let you know I'll be home late today. Don't wait for dinner. See you soon!"
        }
        DemoKind::Suspicious => {
            "Your bank account has been temporarily locked due to suspicious activity. Please verify your account details by clicking this link: http://verify-account-now.xyz"
        }
        DemoKind::Fraud => {
            "CONGRATULATIONS!!! You have WON $1,000,000 in our lottery! To claim your prize, send $500 processing fee IMMEDIATELY to account 1234567890. URGENT - Offer expires in 24 hours! Click here NOW: http://claim-prize-winner.com"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    Caller,
    AiStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallStep {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSimulation {
    pub caller: &'static str,
    pub steps: Vec<CallStep>,
}

impl CallSimulation {
    pub fn caller_lines(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps
            .iter()
            .filter(|s| s.kind == StepKind::Caller)
            .map(|s| s.text)
    }
}

fn caller(text: &'static str) -> CallStep {
    CallStep {
        kind: StepKind::Caller,
        text,
    }
}

fn status(text: &'static str) -> CallStep {
    CallStep {
        kind: StepKind::AiStatus,
        text,
    }
}

pub fn call_simulation(kind: DemoKind) -> CallSimulation {
    match kind {
        DemoKind::Safe => CallSimulation {
            caller: "Mom",
            steps: vec![
                caller("Hello? Hi dear, it's Mom."),
                status("AI: Background noise normal. Voice match: High correlation with 'Mom'."),
                caller("I was just calling to check if you remember your cousin's wedding is this Saturday?"),
                status("AI: Conversational context detected. No fraud indicators."),
                caller("Call me back when you have a minute. Love you, bye!"),
            ],
        },
        DemoKind::Suspicious => CallSimulation {
            caller: "Microsoft Tech Support",
            steps: vec![
                caller("Hello, I am calling from Microsoft Technical Support Department."),
                status("AI: Potential impersonation. Microsoft rarely initiates support calls."),
                caller("We have detected a serious virus on your Windows computer that is stealing your files."),
                status("AI: Creating fear/panic. Suspicious claim."),
                caller("To fix this, I need you to go to your computer and download a remote access tool so I can help you."),
                status("AI: Request for remote access. High risk indicator."),
            ],
        },
        DemoKind::Fraud => CallSimulation {
            caller: "HDFC Bank Security",
            steps: vec![
                caller("Urgent call from HDFC Bank Security. This is an automated alert."),
                status("AI: Automated urgency tactic detected."),
                caller("Your debit card ending in 4592 has been used for a transaction of ₹45,000 at a jeweler in Dubai."),
                status("AI: High-value transaction claim. Financial pressure."),
                caller("If you did not authorize this, press 1 now to speak with an agent. You will need to verify your PIN."),
                status("AI: Request for PIN via phone. DEFINITE FRAUD ATTEMPT."),
            ],
        },
    }
}
