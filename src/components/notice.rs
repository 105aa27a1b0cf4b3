use leptos::prelude::*;

/// One-line feedback shown after an action.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
	Success(String),
	Error(String),
}

impl Notice {
	pub fn success(message: impl Into<String>) -> Self {
		Self::Success(message.into())
	}

	pub fn error(message: impl ToString) -> Self {
		Self::Error(message.to_string())
	}
}

/// Shows the latest notice, if any.
#[component]
pub fn NoticeBar(#[prop(into)] notice: Signal<Option<Notice>>) -> impl IntoView {
	move || {
		notice.get().map(|n| {
			let (class, msg) = match n {
				Notice::Success(msg) => ("notice notice-success", msg),
				Notice::Error(msg) => ("notice notice-error", msg),
			};
			view! { <p class=class>{msg}</p> }
		})
	}
}
