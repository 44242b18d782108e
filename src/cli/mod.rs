use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a single question and print the transcript
    Ask {
        question: String,

        /// Therapy type to focus the answer on (e.g. Basti, Virechana)
        #[arg(short, long)]
        focus: Option<String>,
    },

    /// Start an interactive chat session in the terminal
    Chat {
        /// Initial therapy focus for the session
        #[arg(short, long)]
        focus: Option<String>,
    },

    /// Serve the chat over HTTP, one transcript per session id
    Serve {
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },
}
