use crate::{pages::register::view_model::RegisterViewModel, utils::file::selected_file};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

const FIELD_CLASS: &str = "mt-1 block w-full px-3 py-2 border border-border rounded-md text-fg";

#[component]
pub fn RegisterForm(
    vm: RegisterViewModel,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    let form = vm.form;
    let avatar_name = move || {
        vm.selected_avatar
            .with(|avatar| avatar.as_ref().map(|avatar| avatar.file_name.clone()))
            .unwrap_or_else(|| "Upload Avatar".to_string())
    };
    let avatar_preview = move || {
        vm.selected_avatar
            .with(|avatar| avatar.as_ref().map(|avatar| avatar.preview_data_uri()))
    };

    view! {
        <form class="mt-8 space-y-4" novalidate on:submit=move |ev| on_submit.call(ev)>
            <TextField vm=vm name="username" label="Username" kind="text" value=form.username/>
            <TextField vm=vm name="email" label="Email" kind="email" value=form.email/>
            <PasswordField
                vm=vm
                name="password"
                label="Password"
                value=form.password
                visible=form.show_password
            />
            <PasswordField
                vm=vm
                name="password2"
                label="Confirm Password"
                value=form.password2
                visible=form.show_password2
            />
            <TextField vm=vm name="address" label="Address (Optional)" kind="text" value=form.address/>
            <div>
                <label class="cursor-pointer text-sm font-medium text-action-primary-bg">
                    {avatar_name}
                    <input
                        id="register-avatar"
                        type="file"
                        accept="image/*"
                        class="hidden"
                        on:change=move |ev| {
                            let input = event_target::<HtmlInputElement>(&ev);
                            if let Some(file) = selected_file(&input) {
                                vm.avatar_action.dispatch(file);
                            }
                        }
                    />
                </label>
                {move || avatar_preview().map(|preview| view! {
                    <div class="mt-2 flex items-center space-x-3">
                        <img src=preview alt="Avatar preview" class="h-16 w-16 rounded-full object-cover"/>
                        <button type="button" class="text-sm text-fg-muted" on:click=move |_| vm.remove_avatar()>
                            "Remove"
                        </button>
                    </div>
                })}
                <FieldErrors vm=vm name="avatar"/>
            </div>
            <button
                type="submit"
                disabled=move || pending.get()
                class="w-full flex justify-center py-2 px-4 rounded-md text-sm font-medium text-action-primary-text bg-action-primary-bg disabled:opacity-50"
            >
                {move || if pending.get() { "Creating Account..." } else { "Sign Up" }}
            </button>
        </form>
    }
}

#[component]
fn TextField(
    vm: RegisterViewModel,
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    let id = format!("register-{}", name);
    view! {
        <div>
            <label for=id.clone() class="block text-sm font-medium text-fg">{label}</label>
            <input
                id=id
                name=name
                type=kind
                class=FIELD_CLASS
                aria-invalid=move || (!vm.field_errors(name).is_empty()).to_string()
                prop:value=value
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    vm.clear_field(name);
                }
            />
            <FieldErrors vm=vm name=name/>
        </div>
    }
}

#[component]
fn PasswordField(
    vm: RegisterViewModel,
    name: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    visible: RwSignal<bool>,
) -> impl IntoView {
    let id = format!("register-{}", name);
    view! {
        <div>
            <label for=id.clone() class="block text-sm font-medium text-fg">{label}</label>
            <div class="flex items-center space-x-2">
                <input
                    id=id
                    name=name
                    type=move || if visible.get() { "text" } else { "password" }
                    autocomplete="new-password"
                    class=FIELD_CLASS
                    aria-invalid=move || (!vm.field_errors(name).is_empty()).to_string()
                    prop:value=value
                    on:input=move |ev| {
                        value.set(event_target_value(&ev));
                        vm.clear_field(name);
                    }
                />
                <button
                    type="button"
                    class="text-sm text-fg-muted"
                    aria-label=move || if visible.get() { "Hide password" } else { "Show password" }
                    on:click=move |_| visible.update(|shown| *shown = !*shown)
                >
                    {move || if visible.get() { "Hide" } else { "Show" }}
                </button>
            </div>
            <FieldErrors vm=vm name=name/>
        </div>
    }
}

#[component]
fn FieldErrors(vm: RegisterViewModel, name: &'static str) -> impl IntoView {
    view! {
        <div role="alert" class="field-errors">
            {move || {
                vm.field_errors(name)
                    .into_iter()
                    .map(|message| view! { <p class="text-sm text-status-error-text">{message}</p> })
                    .collect_view()
            }}
        </div>
    }
}
