use crate::utils::file::selected_file;
use leptos::*;
use web_sys::HtmlInputElement;

#[component]
pub fn AvatarPicker(
    #[prop(into)] preview: Signal<String>,
    on_file: Callback<web_sys::File>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center space-y-3">
            <img src=move || preview.get() alt="avatar" class="h-24 w-24 rounded-full object-cover"/>
            <label class="cursor-pointer text-sm font-medium text-action-primary-bg">
                "Change photo"
                <input
                    type="file"
                    accept="image/*"
                    class="hidden"
                    on:change=move |ev| {
                        let input = event_target::<HtmlInputElement>(&ev);
                        if let Some(file) = selected_file(&input) {
                            on_file.call(file);
                        }
                    }
                />
            </label>
        </div>
    }
}
