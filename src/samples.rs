/// Example messages offered to users who have nothing to paste yet.
#[derive(Debug, Clone, Copy)]
pub struct SampleMessage {
    pub title: &'static str,
    pub description: &'static str,
    pub text: &'static str,
    pub expect_scam: bool,
}

pub const SAMPLE_MESSAGES: &[SampleMessage] = &[
    SampleMessage {
        title: "🚨 Scam Example",
        description: "Lottery/Prize scam with OTP request",
        text: "Congratulations! You have won ₹10,00,000 in KBC lottery. To claim prize send OTP \
               received on your mobile. Hurry! Offer expires in 24 hours.",
        expect_scam: true,
    },
    SampleMessage {
        title: "✅ Safe Example",
        description: "Legitimate appointment reminder",
        text: "Hi, this is a reminder that your appointment with Dr. Smith is scheduled for \
               tomorrow at 3 PM. Please reply to confirm. Thank you!",
        expect_scam: false,
    },
];
